// ABOUTME: SQLite ProfileStore using an sqlx pool with idempotent table creation on connect
// ABOUTME: Profiles are stored as JSON documents; meals and water are rows keyed by user and day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::str::FromStr;

use async_trait::async_trait;
use nourish_core::models::{Meal, ProfileUpdate, UserProfile};
use nourish_core::{AppError, AppResult, DateKey};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use tokio::sync::broadcast;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{ProfileStore, StoreEvent, EVENT_CHANNEL_CAPACITY};

const MAX_CONNECTIONS: u32 = 5;

fn db_error(context: &str, e: sqlx::Error) -> AppError {
    AppError::database(format!("{context}: {e}")).with_source(e)
}

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
    events: broadcast::Sender<StoreEvent>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url` and run migrations
    ///
    /// Missing parent directories of a file database are created.
    ///
    /// # Errors
    ///
    /// Returns a database error if the URL is invalid, the file or its
    /// directory cannot be created, or a migration statement fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| db_error("Invalid SQLite URL", e))?
            .create_if_missing(true);
        let in_memory = database_url.contains(":memory:");

        if !in_memory {
            if let Some(parent) = options
                .get_filename()
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                    .with_source(e)
                })?;
            }
        }

        // Each connection to :memory: is its own database
        let max_connections = if in_memory { 1 } else { MAX_CONNECTIONS };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| db_error("Failed to open SQLite database", e))?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let store = Self { pool, events };
        store.migrate().await?;
        Ok(store)
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY,
                profile_data TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create user_profiles", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                calories REAL NOT NULL,
                protein REAL NOT NULL,
                image TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create meals", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meals_user_date ON meals(user_id, date)")
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create meals index", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS water_logs (
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                amount_ml INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create water_logs", e))?;

        debug!("SQLite migrations applied");
        Ok(())
    }

    fn publish(&self, event: StoreEvent) {
        if self.events.send(event).is_err() {
            debug!("No store subscribers");
        }
    }

    fn row_to_meal(row: &SqliteRow) -> AppResult<Meal> {
        let id: String = row.try_get("id").map_err(|e| db_error("meal id", e))?;
        Ok(Meal {
            id: Uuid::parse_str(&id)
                .map_err(|e| AppError::database(format!("Corrupt meal id '{id}': {e}")))?,
            name: row.try_get("name").map_err(|e| db_error("meal name", e))?,
            calories: row
                .try_get("calories")
                .map_err(|e| db_error("meal calories", e))?,
            protein: row
                .try_get("protein")
                .map_err(|e| db_error("meal protein", e))?,
            image: row.try_get("image").map_err(|e| db_error("meal image", e))?,
        })
    }

    fn parse_profile(raw: &str) -> AppResult<UserProfile> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::serialization(format!("Corrupt profile document: {e}")))
    }
}

#[async_trait]
impl ProfileStore for SqliteStore {
    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query("SELECT profile_data FROM user_profiles WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load profile", e))?;

        row.map(|row| {
            let raw: String = row
                .try_get("profile_data")
                .map_err(|e| db_error("profile_data", e))?;
            Self::parse_profile(&raw)
        })
        .transpose()
    }

    #[instrument(skip(self, update))]
    async fn upsert_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> AppResult<UserProfile> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT profile_data FROM user_profiles WHERE user_id = $1")
                .bind(user_id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to load profile", e))?;

        let mut profile = existing
            .as_deref()
            .map(Self::parse_profile)
            .transpose()?
            .unwrap_or_default();
        profile.apply(update);

        let document = serde_json::to_string(&profile)
            .map_err(|e| AppError::serialization(format!("Failed to encode profile: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO user_profiles (user_id, profile_data)
            VALUES ($1, $2)
            ON CONFLICT(user_id) DO UPDATE SET
                profile_data = excluded.profile_data,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(user_id.to_string())
        .bind(document)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to store profile", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit profile", e))?;

        self.publish(StoreEvent::ProfileUpdated { user_id });
        Ok(profile)
    }

    #[instrument(skip(self, meal), fields(meal_id = %meal.id))]
    async fn append_meal(&self, user_id: Uuid, date: DateKey, meal: &Meal) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO meals (id, user_id, date, name, calories, protein, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(meal.id.to_string())
        .bind(user_id.to_string())
        .bind(date.to_string())
        .bind(&meal.name)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.image.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to store meal", e))?;

        self.publish(StoreEvent::MealsChanged { user_id, date });
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_meal(&self, user_id: Uuid, date: DateKey, meal_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2 AND date = $3")
            .bind(meal_id.to_string())
            .bind(user_id.to_string())
            .bind(date.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to remove meal", e))?;

        let removed = result.rows_affected() > 0;
        if removed {
            self.publish(StoreEvent::MealsChanged { user_id, date });
        }
        Ok(removed)
    }

    async fn meals_for_day(&self, user_id: Uuid, date: DateKey) -> AppResult<Vec<Meal>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, calories, protein, image
            FROM meals WHERE user_id = $1 AND date = $2
            ORDER BY rowid
            ",
        )
        .bind(user_id.to_string())
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load meals", e))?;

        rows.iter().map(Self::row_to_meal).collect()
    }

    #[instrument(skip(self))]
    async fn add_water(&self, user_id: Uuid, date: DateKey, ml: u32) -> AppResult<u32> {
        let total: i64 = sqlx::query_scalar(
            r"
            INSERT INTO water_logs (user_id, date, amount_ml)
            VALUES ($1, $2, $3)
            ON CONFLICT(user_id, date) DO UPDATE SET
                amount_ml = amount_ml + excluded.amount_ml
            RETURNING amount_ml
            ",
        )
        .bind(user_id.to_string())
        .bind(date.to_string())
        .bind(i64::from(ml))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to log water", e))?;

        let total_ml = u32::try_from(total).unwrap_or(u32::MAX);
        self.publish(StoreEvent::WaterChanged {
            user_id,
            date,
            total_ml,
        });
        Ok(total_ml)
    }

    async fn water_for_day(&self, user_id: Uuid, date: DateKey) -> AppResult<u32> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT amount_ml FROM water_logs WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id.to_string())
        .bind(date.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load water", e))?;

        Ok(total.map_or(0, |ml| u32::try_from(ml).unwrap_or(u32::MAX)))
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

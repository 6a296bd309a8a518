// ABOUTME: Persistence abstraction for user profiles and per-day meal and water logs
// ABOUTME: Provides the ProfileStore trait, change events, and backend selection by URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Storage
//!
//! One profile document per user plus a log per user per day. Every write
//! publishes a [`StoreEvent`] so live views can refresh without polling.

mod memory;
mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use async_trait::async_trait;
use nourish_core::models::{Meal, ProfileUpdate, UserProfile};
use nourish_core::{AppResult, DateKey};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseUrl;

/// Buffered events per subscriber before older ones are dropped
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A change written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The profile document changed
    ProfileUpdated {
        /// Owner
        user_id: Uuid,
    },
    /// A meal was added to or removed from a day
    MealsChanged {
        /// Owner
        user_id: Uuid,
        /// Affected day
        date: DateKey,
    },
    /// Water was logged for a day
    WaterChanged {
        /// Owner
        user_id: Uuid,
        /// Affected day
        date: DateKey,
        /// New total (mL)
        total_ml: u32,
    },
}

/// Profile and daily log persistence
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load a profile, `None` if the user has never written one
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Merge `update` into the stored profile (creating it from defaults) and return the result
    async fn upsert_profile(&self, user_id: Uuid, update: &ProfileUpdate)
        -> AppResult<UserProfile>;

    /// Append a meal to a day's log
    async fn append_meal(&self, user_id: Uuid, date: DateKey, meal: &Meal) -> AppResult<()>;

    /// Remove a meal by id; `false` when the day has no such meal
    async fn remove_meal(&self, user_id: Uuid, date: DateKey, meal_id: Uuid) -> AppResult<bool>;

    /// Meals logged for a day, in insertion order
    async fn meals_for_day(&self, user_id: Uuid, date: DateKey) -> AppResult<Vec<Meal>>;

    /// Add water to a day's total and return the new total (mL)
    async fn add_water(&self, user_id: Uuid, date: DateKey, ml: u32) -> AppResult<u32>;

    /// Water logged for a day (mL)
    async fn water_for_day(&self, user_id: Uuid, date: DateKey) -> AppResult<u32>;

    /// Receive every subsequent change
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

/// Open the store selected by `url`
///
/// # Errors
///
/// Returns a database error if the SQLite pool cannot be opened or migrated
pub async fn connect(url: &DatabaseUrl) -> AppResult<Arc<dyn ProfileStore>> {
    match url {
        DatabaseUrl::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        DatabaseUrl::Sqlite { url } => {
            info!(url = %url, "Using SQLite store");
            Ok(Arc::new(SqliteStore::connect(url).await?))
        }
    }
}

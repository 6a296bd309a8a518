// ABOUTME: Integration tests for ProfileStore backends
// ABOUTME: Covers profile merging, meal ordering and removal, water totals, and SQLite persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nourish::config::DatabaseUrl;
use nourish::database::{connect, InMemoryStore, ProfileStore, SqliteStore, StoreEvent};
use nourish_core::models::{DerivedGoals, Meal, ProfileUpdate};
use tempfile::TempDir;
use uuid::Uuid;

mod common;

use common::{day, reference_today};

fn goals() -> DerivedGoals {
    DerivedGoals {
        maintenance_calories: 2136,
        daily_goal: 1590,
        protein_goal: 65,
        water_goal: 2800,
    }
}

async fn exercise_store(store: &dyn ProfileStore) {
    let user = Uuid::new_v4();
    let today = reference_today();

    assert!(store.get_profile(user).await.unwrap().is_none());

    // Partial updates merge field by field
    store
        .upsert_profile(user, &ProfileUpdate::default().with_user_name("Sam"))
        .await
        .unwrap();
    let merged = store
        .upsert_profile(
            user,
            &ProfileUpdate::from_goals(&goals()).with_streak_entry(today),
        )
        .await
        .unwrap();
    assert_eq!(merged.user_name, "Sam");
    assert_eq!(merged.goals(), goals());
    assert!(merged.streak_data.is_completed(today));
    assert_eq!(store.get_profile(user).await.unwrap(), Some(merged));

    // Meals keep insertion order and are scoped to their day
    let breakfast = Meal::new("Oatmeal", 300.0, 10.0);
    let lunch = Meal {
        image: Some("data:image/jpeg;base64,/9j/".to_owned()),
        ..Meal::new("Chicken salad", 450.0, 38.0)
    };
    store.append_meal(user, today, &breakfast).await.unwrap();
    store.append_meal(user, today, &lunch).await.unwrap();
    store
        .append_meal(user, today.pred(), &Meal::new("Pizza", 900.0, 30.0))
        .await
        .unwrap();

    let meals = store.meals_for_day(user, today).await.unwrap();
    assert_eq!(meals, vec![breakfast.clone(), lunch.clone()]);

    assert!(store.remove_meal(user, today, breakfast.id).await.unwrap());
    assert!(!store.remove_meal(user, today, breakfast.id).await.unwrap());
    assert_eq!(store.meals_for_day(user, today).await.unwrap(), vec![lunch]);
    assert_eq!(store.meals_for_day(user, today.pred()).await.unwrap().len(), 1);

    // Water accumulates per day
    assert_eq!(store.water_for_day(user, today).await.unwrap(), 0);
    assert_eq!(store.add_water(user, today, 100).await.unwrap(), 100);
    assert_eq!(store.add_water(user, today, 250).await.unwrap(), 350);
    assert_eq!(store.water_for_day(user, today).await.unwrap(), 350);
    assert_eq!(store.water_for_day(user, today.plus_days(1)).await.unwrap(), 0);

    // Other users see nothing
    let other = Uuid::new_v4();
    assert!(store.meals_for_day(other, today).await.unwrap().is_empty());
    assert_eq!(store.water_for_day(other, today).await.unwrap(), 0);
}

#[tokio::test]
async fn test_memory_store_contract() {
    common::init_test_logging();
    exercise_store(&InMemoryStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_store_contract() {
    common::init_test_logging();
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    exercise_store(&store).await;
}

#[tokio::test]
async fn test_sqlite_file_survives_reconnect() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("nourish.db").display());
    let user = Uuid::new_v4();
    let date = day("2024-01-10");

    {
        let store = SqliteStore::connect(&url).await.unwrap();
        store
            .upsert_profile(user, &ProfileUpdate::from_goals(&goals()))
            .await
            .unwrap();
        store
            .append_meal(user, date, &Meal::new("Soup", 250.0, 8.0))
            .await
            .unwrap();
        store.add_water(user, date, 100).await.unwrap();
    }

    let reopened = connect(&DatabaseUrl::parse_url(&url)).await.unwrap();
    let profile = reopened.get_profile(user).await.unwrap().unwrap();
    assert_eq!(profile.goals(), goals());
    assert_eq!(reopened.meals_for_day(user, date).await.unwrap().len(), 1);
    assert_eq!(reopened.water_for_day(user, date).await.unwrap(), 100);
}

#[tokio::test]
async fn test_sqlite_creates_missing_data_directory() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("data").join("nested").join("nourish.db");
    let url = format!("sqlite:{}", db_path.display());

    let store = connect(&DatabaseUrl::parse_url(&url)).await.unwrap();
    store.add_water(Uuid::new_v4(), reference_today(), 100).await.unwrap();

    assert!(db_path.exists());
}

#[tokio::test]
async fn test_sqlite_publishes_meal_events() {
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    let mut events = store.subscribe();
    let user = Uuid::new_v4();
    let date = reference_today();

    store
        .append_meal(user, date, &Meal::new("Toast", 150.0, 5.0))
        .await
        .unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::MealsChanged {
            user_id: user,
            date
        }
    );
}

#[tokio::test]
async fn test_connect_memory_url() {
    let store = connect(&DatabaseUrl::Memory).await.unwrap();
    assert!(store.get_profile(Uuid::new_v4()).await.unwrap().is_none());
}

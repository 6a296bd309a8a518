// ABOUTME: Process-local ProfileStore backed by concurrent hash maps
// ABOUTME: Used for tests and the DATABASE_URL=memory mode; contents are lost on exit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use dashmap::DashMap;
use nourish_core::models::{Meal, ProfileUpdate, UserProfile};
use nourish_core::{AppResult, DateKey};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use super::{ProfileStore, StoreEvent, EVENT_CHANNEL_CAPACITY};

#[derive(Debug, Clone, Default)]
struct DayLog {
    meals: Vec<Meal>,
    water_ml: u32,
}

/// In-memory store
pub struct InMemoryStore {
    profiles: DashMap<Uuid, UserProfile>,
    days: DashMap<(Uuid, DateKey), DayLog>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            profiles: DashMap::new(),
            days: DashMap::new(),
            events,
        }
    }

    fn publish(&self, event: StoreEvent) {
        if self.events.send(event).is_err() {
            debug!("No store subscribers");
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.value().clone()))
    }

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> AppResult<UserProfile> {
        let profile = {
            let mut entry = self.profiles.entry(user_id).or_default();
            entry.apply(update);
            entry.clone()
        };
        self.publish(StoreEvent::ProfileUpdated { user_id });
        Ok(profile)
    }

    async fn append_meal(&self, user_id: Uuid, date: DateKey, meal: &Meal) -> AppResult<()> {
        self.days
            .entry((user_id, date))
            .or_default()
            .meals
            .push(meal.clone());
        self.publish(StoreEvent::MealsChanged { user_id, date });
        Ok(())
    }

    async fn remove_meal(&self, user_id: Uuid, date: DateKey, meal_id: Uuid) -> AppResult<bool> {
        let removed = self
            .days
            .get_mut(&(user_id, date))
            .is_some_and(|mut log| {
                let before = log.meals.len();
                log.meals.retain(|m| m.id != meal_id);
                log.meals.len() < before
            });
        if removed {
            self.publish(StoreEvent::MealsChanged { user_id, date });
        }
        Ok(removed)
    }

    async fn meals_for_day(&self, user_id: Uuid, date: DateKey) -> AppResult<Vec<Meal>> {
        Ok(self
            .days
            .get(&(user_id, date))
            .map(|log| log.meals.clone())
            .unwrap_or_default())
    }

    async fn add_water(&self, user_id: Uuid, date: DateKey, ml: u32) -> AppResult<u32> {
        let total_ml = {
            let mut log = self.days.entry((user_id, date)).or_default();
            log.water_ml = log.water_ml.saturating_add(ml);
            log.water_ml
        };
        self.publish(StoreEvent::WaterChanged {
            user_id,
            date,
            total_ml,
        });
        Ok(total_ml)
    }

    async fn water_for_day(&self, user_id: Uuid, date: DateKey) -> AppResult<u32> {
        Ok(self
            .days
            .get(&(user_id, date))
            .map_or(0, |log| log.water_ml))
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

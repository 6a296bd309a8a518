// ABOUTME: Shared test utilities and setup functions for root crate integration tests
// ABOUTME: Provides quiet logging, reference surveys, fake model collaborators, and tracker builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `nourish`

use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use nourish::clock::FixedClock;
use nourish::database::{InMemoryStore, ProfileStore, SqliteStore};
use nourish::llm::{InsightGenerator, MealAnalyzer};
use nourish::services::NutritionTracker;
use nourish_core::models::{ActivityLevel, DateOfBirth, Gender, Goal, MealEstimate, SurveyData};
use nourish_core::{AppError, AppResult, DateKey, ErrorCode};
use nourish_intelligence::{derive_goals, NutritionConfig, OnboardingResult};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Parse a `YYYY-MM-DD` key
pub fn day(s: &str) -> DateKey {
    s.parse().unwrap()
}

/// Male, 30 on 2024-06-15, 80 kg, 180 cm, sedentary, losing 0.5 kg/week
pub fn reference_survey() -> SurveyData {
    SurveyData {
        name: "Sam".to_owned(),
        goal: Goal::Lose,
        gender: Gender::Male,
        dob: Some(DateOfBirth::new(1994, 6, 15)),
        age: None,
        weight: 80.0,
        height: 180.0,
        activity_level: ActivityLevel::Sedentary,
        target_weight: 75.0,
        weekly_rate: Some(0.5),
    }
}

/// A Saturday; the reference survey is exactly 30 on this day
pub fn reference_today() -> DateKey {
    day("2024-06-15")
}

/// Finished onboarding for the reference survey (goal 1590, maintenance 2136)
pub fn onboarding_result() -> OnboardingResult {
    let survey = reference_survey();
    let goals = derive_goals(&survey, reference_today(), &NutritionConfig::default());
    OnboardingResult {
        name: survey.name.clone(),
        goal: goals.daily_goal,
        maintenance: goals.maintenance_calories,
        protein_goal: goals.protein_goal,
        water_goal: goals.water_goal,
        initial_survey: survey,
    }
}

/// Tracker over an in-memory store with a clock pinned to [`reference_today`]
pub fn memory_tracker() -> (NutritionTracker, Arc<FixedClock>) {
    init_test_logging();
    tracker_over(Arc::new(InMemoryStore::new()))
}

/// Tracker over an in-memory SQLite database
pub async fn sqlite_tracker() -> (NutritionTracker, Arc<FixedClock>) {
    init_test_logging();
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    tracker_over(Arc::new(store))
}

fn tracker_over(store: Arc<dyn ProfileStore>) -> (NutritionTracker, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(reference_today()));
    let tracker = NutritionTracker::new(store, clock.clone(), NutritionConfig::default());
    (tracker, clock)
}

/// Analyzer returning a fixed estimate and recording the image it was given
pub struct FakeAnalyzer {
    pub estimate: MealEstimate,
    pub last_image: Mutex<Option<String>>,
}

impl FakeAnalyzer {
    pub fn new(estimate: MealEstimate) -> Self {
        Self {
            estimate,
            last_image: Mutex::new(None),
        }
    }
}

#[async_trait]
impl MealAnalyzer for FakeAnalyzer {
    async fn analyze_meal(&self, image_jpeg_base64: &str, _prompt: &str) -> AppResult<MealEstimate> {
        *self.last_image.lock().unwrap() = Some(image_jpeg_base64.to_owned());
        Ok(self.estimate.clone())
    }
}

/// Insight generator echoing its inputs, or failing when `fail` is set
#[derive(Default)]
pub struct FakeInsights {
    pub fail: bool,
    pub last_summary: Mutex<Option<String>>,
}

#[async_trait]
impl InsightGenerator for FakeInsights {
    async fn meal_insight(
        &self,
        meal_summary: &str,
        daily_goal: i64,
        daily_protein_goal: i64,
    ) -> AppResult<String> {
        if self.fail {
            return Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "insight service down",
            ));
        }
        *self.last_summary.lock().unwrap() = Some(meal_summary.to_owned());
        Ok(format!("Nice work toward {daily_goal} kcal and {daily_protein_goal}g protein"))
    }
}

// ABOUTME: Shared fixtures for nourish-intelligence integration tests
// ABOUTME: Quiet test logging plus reference surveys and date helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `nourish_intelligence`

use std::env;
use std::sync::Once;

use nourish_core::models::{ActivityLevel, DateOfBirth, Gender, Goal, SurveyData};
use nourish_core::DateKey;
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

/// The date on which [`reference_survey`] is exactly 30
pub fn reference_today() -> DateKey {
    day("2024-06-15")
}

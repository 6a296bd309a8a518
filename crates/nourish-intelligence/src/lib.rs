// ABOUTME: Nutrition goal engine for the Nourish tracker
// ABOUTME: Calculators, onboarding flow, check-in, streaks, meal drafts, and trend reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nourish Intelligence
//!
//! Deterministic nutrition logic with no I/O. Every function takes the date
//! it should treat as "today" so callers control the clock.
//!
//! ## Modules
//!
//! - **config**: Tunable coefficients with environment overrides
//! - **`goal_calculator`**: BMR, maintenance, protein, water, and calorie goals
//! - **onboarding**: Survey step machine producing an `OnboardingResult`
//! - **`check_in`**: Monthly weight re-survey and weight projection
//! - **streak**: Goal-met streaks and Sunday-based weekly progress

/// Nutrition engine configuration
pub mod config;

/// Periodic weight check-in
pub mod check_in;

/// Goal derivation from survey answers
pub mod goal_calculator;

/// Editable meal entries
pub mod meal_draft;

/// Onboarding survey state machine
pub mod onboarding;

/// Streaks and weekly progress
pub mod streak;

/// Daily totals and multi-day reports
pub mod trends;

/// Age, height, and rounding helpers
pub mod units;

pub use check_in::{is_check_in_due, predicted_weight, recalculate, CheckInOutcome};
pub use config::{ConfigError, NutritionConfig};
pub use goal_calculator::{derive_goals, CaloriePlan};
pub use meal_draft::MealDraft;
pub use onboarding::{DobPart, OnboardingResult, OnboardingStep, OnboardingSurvey};
pub use streak::{
    current_streak, should_trigger_goal_completion, week_calendar, weekly_progress_on_completion,
    CalendarDay, WeeklyGoalProgress,
};
pub use trends::ProgressReport;
pub use units::HeightUnit;

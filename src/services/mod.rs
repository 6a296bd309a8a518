// ABOUTME: Domain service layer combining storage, clock, and the goal engine
// ABOUTME: Exposes the nutrition tracker used by front ends and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily tracking, onboarding, check-ins, and model-backed features
pub mod tracker;

pub use tracker::{MealLogged, NutritionTracker, TodaySummary};

// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for energy balance, profile defaults, and tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace. Tunable coefficients live in `NutritionConfig`; the values
//! here are either physical facts or the stored-document defaults.

/// Energy balance facts
pub mod energy {
    /// Energy equivalent of one kilogram of body mass (kcal)
    pub const KCAL_PER_KG: f64 = 7700.0;

    /// Days per week, used to spread a weekly rate over single days
    pub const DAYS_PER_WEEK: f64 = 7.0;
}

/// Defaults applied when a stored profile lacks a value
pub mod profile_defaults {
    /// Daily calorie goal (kcal)
    pub const DAILY_GOAL: i64 = 2200;

    /// Daily protein goal (g)
    pub const DAILY_PROTEIN_GOAL: i64 = 120;

    /// Daily water goal (mL)
    pub const DAILY_WATER_GOAL: i64 = 2500;

    /// Maintenance calories (kcal)
    pub const MAINTENANCE_CALORIES: i64 = 2000;
}

/// Calendar and progress-tracking limits
pub mod tracking {
    /// Days in a tracking week
    pub const DAYS_IN_WEEK: u8 = 7;

    /// Default days between weight check-ins
    pub const CHECK_IN_INTERVAL_DAYS: i64 = 30;

    /// Default amount added per water log (mL)
    pub const WATER_INCREMENT_ML: u32 = 100;

    /// Default number of days in the progress history window
    pub const HISTORY_WINDOW_DAYS: u32 = 10;

    /// Longest history a single request may ask for
    pub const MAX_HISTORY_DAYS: u32 = 366;
}

/// Unit conversion constants
pub mod units {
    /// Centimeters per inch
    pub const CM_PER_INCH: f64 = 2.54;

    /// Inches per foot
    pub const INCHES_PER_FOOT: f64 = 12.0;
}

/// Date formatting
pub mod formats {
    /// Format of a day key (`YYYY-MM-DD`)
    pub const DATE_KEY: &str = "%Y-%m-%d";
}

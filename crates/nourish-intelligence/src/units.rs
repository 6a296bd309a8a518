// ABOUTME: Age-from-birthdate, height unit conversion, and shared rounding helpers
// ABOUTME: Legacy survey records without a birth date fall back to the stored age
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Datelike;
use nourish_core::constants::units::{CM_PER_INCH, INCHES_PER_FOOT};
use nourish_core::models::{DateOfBirth, SurveyData};
use nourish_core::DateKey;
use serde::{Deserialize, Serialize};

/// Round halves toward positive infinity, so `2.5 -> 3` and `-2.5 -> -2`
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Round to the nearest multiple of `step`, then to a whole number
#[must_use]
pub fn round_to_step(value: f64, step: f64) -> i64 {
    round_half_up(round_half_up(value / step) as f64 * step)
}

/// Round half-up to one decimal place for display
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) as f64 / 10.0
}

/// Whole years between a birth date and `today`
///
/// Returns 0 when the birth date is absent, incomplete, not a real calendar
/// date, or in the future.
#[must_use]
pub fn age_on(dob: Option<&DateOfBirth>, today: DateKey) -> u32 {
    let Some(birth) = dob.and_then(DateOfBirth::to_date) else {
        return 0;
    };
    let today = today.date();

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Age used by the calculator: birth date first, then the legacy age field
#[must_use]
pub fn resolve_age(data: &SurveyData, today: DateKey) -> u32 {
    match data.dob {
        Some(dob) if dob.is_complete() => age_on(Some(&dob), today),
        _ => data.age.unwrap_or(0),
    }
}

/// Centimeters to whole feet and rounded inches
#[must_use]
pub fn cm_to_feet_inches(cm: f64) -> (u32, u32) {
    let total_inches = (cm / CM_PER_INCH).max(0.0);
    let mut feet = (total_inches / INCHES_PER_FOOT).floor() as u32;
    let mut inches = round_half_up(total_inches % INCHES_PER_FOOT) as u32;
    if inches >= INCHES_PER_FOOT as u32 {
        feet += 1;
        inches = 0;
    }
    (feet, inches)
}

/// Feet and inches to centimeters
#[must_use]
pub fn feet_inches_to_cm(feet: u32, inches: f64) -> f64 {
    (f64::from(feet) * INCHES_PER_FOOT + inches) * CM_PER_INCH
}

/// Unit used to display height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    /// Centimeters
    #[default]
    Cm,
    /// Feet and inches
    Ft,
}

impl HeightUnit {
    /// The other unit
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cm => Self::Ft,
            Self::Ft => Self::Cm,
        }
    }
}

/// Height for display, e.g. `175.0 cm` or `5' 9"`
#[must_use]
pub fn format_height(cm: f64, unit: HeightUnit) -> String {
    match unit {
        HeightUnit::Cm => format!("{cm:.1} cm"),
        HeightUnit::Ft => {
            let (feet, inches) = cm_to_feet_inches(cm);
            format!("{feet}' {inches}\"")
        }
    }
}

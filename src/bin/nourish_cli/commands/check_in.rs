// ABOUTME: Check-in command for nourish-cli
// ABOUTME: Recalculates goals for a new weight and projects the stored plan forward
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use nourish_core::models::SurveyData;
use nourish_core::{AppError, DateKey, ErrorCode};
use nourish_intelligence::check_in::days_until_check_in;
use nourish_intelligence::{is_check_in_due, recalculate, CheckInOutcome, NutritionConfig};
use serde::Serialize;

use crate::helpers::display::print_json;
use crate::helpers::input::read_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckInReport {
    today: DateKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    check_in_due: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_until_check_in: Option<i64>,
    #[serde(flatten)]
    outcome: CheckInOutcome,
}

/// Print the recalculated goals for `weight`
pub fn run(
    survey_path: &Path,
    weight: f64,
    last_check_in: Option<DateKey>,
    today: DateKey,
    config: &NutritionConfig,
) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(AppError::new(
            ErrorCode::ValueOutOfRange,
            "--weight must be a positive number of kilograms",
        )
        .into());
    }
    let survey: SurveyData = read_json(survey_path)?;

    print_json(&CheckInReport {
        today,
        check_in_due: last_check_in.map(|last| is_check_in_due(last, today, &config.check_in)),
        days_until_check_in: last_check_in
            .map(|last| days_until_check_in(last, today, &config.check_in)),
        outcome: recalculate(&survey, weight, today, config),
    })
}

// ABOUTME: Goals command for nourish-cli
// ABOUTME: Derives maintenance, calorie, protein, and water goals from a survey file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use nourish_core::models::{DerivedGoals, SurveyData};
use nourish_core::DateKey;
use nourish_intelligence::goal_calculator::calculate_bmr;
use nourish_intelligence::units::{format_height, resolve_age, round_to_tenth};
use nourish_intelligence::{derive_goals, CaloriePlan, HeightUnit, NutritionConfig};
use serde::Serialize;
use tracing::info;

use crate::helpers::display::print_json;
use crate::helpers::input::read_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalsReport {
    today: DateKey,
    age: u32,
    bmr: f64,
    goals: DerivedGoals,
    calorie_plan: CaloriePlan,
    height_cm: String,
    height_ft: String,
}

/// Print goals for the survey at `survey_path`
pub fn run(survey_path: &Path, today: DateKey, config: &NutritionConfig) -> Result<()> {
    let survey: SurveyData = read_json(survey_path)?;
    let goals = derive_goals(&survey, today, config);
    info!(daily_goal = goals.daily_goal, "Derived goals");

    print_json(&GoalsReport {
        today,
        age: resolve_age(&survey, today),
        bmr: round_to_tenth(calculate_bmr(&survey, today, &config.bmr)),
        calorie_plan: CaloriePlan::from_goals(&goals, survey.goal),
        goals,
        height_cm: format_height(survey.height, HeightUnit::Cm),
        height_ft: format_height(survey.height, HeightUnit::Ft),
    })
}

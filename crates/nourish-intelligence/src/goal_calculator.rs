// ABOUTME: Derives calorie, protein, and water targets from onboarding survey answers
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled maintenance, and pace-aware calorie goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal Calculator
//!
//! Pure functions over [`SurveyData`]. The same survey, date, and
//! configuration always produce the same goals. Inputs are not range-checked;
//! the survey UI bounds them.
//!
//! # Reference
//! Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241

use nourish_core::constants::energy::DAYS_PER_WEEK;
use nourish_core::models::{DerivedGoals, Gender, Goal, SurveyData};
use nourish_core::DateKey;
use serde::{Deserialize, Serialize};

use crate::config::{BmrConfig, NutritionConfig, PacingConfig};
use crate::units::{resolve_age, round_half_up, round_to_step};

/// Basal metabolic rate (kcal/day) using Mifflin-St Jeor
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// Age comes from [`resolve_age`]; a survey with no usable age is treated as age 0.
#[must_use]
pub fn calculate_bmr(data: &SurveyData, today: DateKey, config: &BmrConfig) -> f64 {
    let age = resolve_age(data, today);

    let weight_component = config.msj_weight_coef * data.weight;
    let height_component = config.msj_height_coef * data.height;
    let age_component = config.msj_age_coef * f64::from(age);

    let gender_constant = match data.gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };

    weight_component + height_component + age_component + gender_constant
}

/// Calories that keep weight stable: BMR scaled by the activity multiplier
#[must_use]
pub fn calculate_maintenance_calories(
    data: &SurveyData,
    today: DateKey,
    config: &NutritionConfig,
) -> i64 {
    let bmr = calculate_bmr(data, today, &config.bmr);
    round_half_up(bmr * config.activity_factors.get(data.activity_level))
}

/// Daily protein target in grams, rounded to the configured step
#[must_use]
pub fn calculate_protein_goal(data: &SurveyData, config: &NutritionConfig) -> i64 {
    let grams = data.weight * config.protein.grams_per_kg.get(data.activity_level);
    round_to_step(grams, config.protein.rounding_step_g)
}

/// Daily water target in mL, rounded to the configured step
#[must_use]
pub fn calculate_water_goal(data: &SurveyData, config: &NutritionConfig) -> i64 {
    let hydration = &config.hydration;
    let ml = data.weight.mul_add(
        hydration.ml_per_kg,
        hydration.activity_bonus_ml.get(data.activity_level),
    );
    round_to_step(ml, hydration.rounding_step_ml)
}

/// Daily calorie change implied by a weekly pace (kcal, unsigned)
#[must_use]
pub fn daily_delta_for_rate(weekly_rate_kg: f64, pacing: &PacingConfig) -> i64 {
    round_half_up(weekly_rate_kg * pacing.kcal_per_kg / DAYS_PER_WEEK)
}

/// Signed daily adjustment applied to maintenance for the survey's goal
///
/// With a weekly rate the adjustment follows the pace; without one, losing
/// and gaining use the fixed legacy deficit and surplus.
#[must_use]
pub fn calorie_adjustment(data: &SurveyData, pacing: &PacingConfig) -> i64 {
    match (data.goal, data.weekly_rate) {
        (Goal::Maintain, _) => 0,
        (Goal::Lose, Some(rate)) => -daily_delta_for_rate(rate, pacing),
        (Goal::Gain, Some(rate)) => daily_delta_for_rate(rate, pacing),
        (Goal::Lose, None) => -round_half_up(pacing.legacy_deficit_kcal),
        (Goal::Gain, None) => round_half_up(pacing.legacy_surplus_kcal),
    }
}

/// Calorie goal for the survey's direction and pace, rounded to the configured step
#[must_use]
pub fn calculate_final_goal(data: &SurveyData, today: DateKey, config: &NutritionConfig) -> i64 {
    let maintenance = calculate_maintenance_calories(data, today, config);
    let target = maintenance + calorie_adjustment(data, &config.pacing);
    round_to_step(target as f64, config.pacing.rounding_step_kcal)
}

/// All four targets for a survey
#[must_use]
pub fn derive_goals(data: &SurveyData, today: DateKey, config: &NutritionConfig) -> DerivedGoals {
    let maintenance_calories = calculate_maintenance_calories(data, today, config);
    let adjusted = maintenance_calories + calorie_adjustment(data, &config.pacing);

    DerivedGoals {
        maintenance_calories,
        daily_goal: round_to_step(adjusted as f64, config.pacing.rounding_step_kcal),
        protein_goal: calculate_protein_goal(data, config),
        water_goal: calculate_water_goal(data, config),
    }
}

/// How the calorie goal relates to maintenance, for the recommendation card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaloriePlan {
    /// Goal direction
    pub goal: Goal,
    /// Maintenance calories (kcal)
    pub maintenance_calories: i64,
    /// Calorie goal (kcal)
    pub daily_goal: i64,
    /// Deficit when losing, surplus when gaining, 0 when maintaining (kcal)
    pub difference: i64,
    /// One-line recommendation
    pub recommendation: String,
}

impl CaloriePlan {
    /// Build the plan from stored goals
    #[must_use]
    pub fn from_goals(goals: &DerivedGoals, goal: Goal) -> Self {
        let maintenance = goals.maintenance_calories;
        let daily = goals.daily_goal;
        let (difference, recommendation) = match goal {
            Goal::Lose => {
                let deficit = maintenance - daily;
                (
                    deficit,
                    format!(
                        "Eat {daily} kcal per day, a {deficit} kcal deficit below your {maintenance} kcal maintenance, to lose weight."
                    ),
                )
            }
            Goal::Gain => {
                let surplus = daily - maintenance;
                (
                    surplus,
                    format!(
                        "Eat {daily} kcal per day, a {surplus} kcal surplus above your {maintenance} kcal maintenance, to gain weight."
                    ),
                )
            }
            Goal::Maintain => (
                0,
                format!("Eat around {daily} kcal per day to maintain your current weight."),
            ),
        };

        Self {
            goal,
            maintenance_calories: maintenance,
            daily_goal: daily,
            difference,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nourish_core::models::{ActivityLevel, DateOfBirth};

    fn today() -> DateKey {
        "2024-06-15".parse().unwrap()
    }

    fn reference_survey() -> SurveyData {
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

    #[test]
    fn test_reference_bmr_and_maintenance() {
        let config = NutritionConfig::default();
        let survey = reference_survey();

        // 10*80 + 6.25*180 - 5*30 + 5
        let bmr = calculate_bmr(&survey, today(), &config.bmr);
        assert!((bmr - 1780.0).abs() < 1e-9);
        assert_eq!(calculate_maintenance_calories(&survey, today(), &config), 2136);
    }

    #[test]
    fn test_female_constant() {
        let config = NutritionConfig::default();
        let survey = SurveyData {
            gender: Gender::Female,
            ..reference_survey()
        };
        let bmr = calculate_bmr(&survey, today(), &config.bmr);
        assert!((bmr - 1614.0).abs() < 1e-9);
    }

    #[test]
    fn test_protein_and_water_goals() {
        let config = NutritionConfig::default();
        let survey = reference_survey();
        assert_eq!(calculate_protein_goal(&survey, &config), 65);
        assert_eq!(calculate_water_goal(&survey, &config), 2800);

        let active = SurveyData {
            activity_level: ActivityLevel::Active,
            ..reference_survey()
        };
        // 80 * 1.6 = 128 -> 130; 80 * 35 + 900 = 3700
        assert_eq!(calculate_protein_goal(&active, &config), 130);
        assert_eq!(calculate_water_goal(&active, &config), 3700);
    }

    #[test]
    fn test_adjustment_paths() {
        let pacing = PacingConfig::default();
        let lose_legacy = SurveyData {
            weekly_rate: None,
            ..reference_survey()
        };
        let gain_legacy = SurveyData {
            goal: Goal::Gain,
            ..lose_legacy.clone()
        };
        let maintain = SurveyData {
            goal: Goal::Maintain,
            ..reference_survey()
        };

        assert_eq!(calorie_adjustment(&reference_survey(), &pacing), -550);
        assert_eq!(calorie_adjustment(&lose_legacy, &pacing), -500);
        assert_eq!(calorie_adjustment(&gain_legacy, &pacing), 300);
        assert_eq!(calorie_adjustment(&maintain, &pacing), 0);
    }

    #[test]
    fn test_weekly_rate_goal() {
        let config = NutritionConfig::default();
        assert_eq!(daily_delta_for_rate(0.5, &config.pacing), 550);
        // 2136 - 550 = 1586
        assert_eq!(calculate_final_goal(&reference_survey(), today(), &config), 1590);
        assert_eq!(round_to_step((2259 - 550) as f64, 10.0), 1710);
    }

    #[test]
    fn test_calorie_plan_lose() {
        let goals = DerivedGoals {
            maintenance_calories: 2259,
            daily_goal: 1710,
            protein_goal: 65,
            water_goal: 2800,
        };
        let plan = CaloriePlan::from_goals(&goals, Goal::Lose);
        assert_eq!(plan.difference, 549);
        assert!(plan.recommendation.contains("549 kcal deficit"));
    }

    #[test]
    fn test_calorie_plan_gain_and_maintain() {
        let goals = DerivedGoals {
            maintenance_calories: 2000,
            daily_goal: 2300,
            protein_goal: 100,
            water_goal: 2500,
        };
        assert_eq!(CaloriePlan::from_goals(&goals, Goal::Gain).difference, 300);
        assert_eq!(CaloriePlan::from_goals(&goals, Goal::Maintain).difference, 0);
    }
}

// ABOUTME: Periodic weight check-in that recomputes goals for a new weight
// ABOUTME: Detects when a check-in is due and projects weight over the next month
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nourish_core::models::{DerivedGoals, ProfileUpdate, SurveyData, SurveyHistory};
use nourish_core::DateKey;
use serde::{Deserialize, Serialize};

use crate::config::{CheckInConfig, NutritionConfig};
use crate::goal_calculator::derive_goals;
use crate::units::round_to_tenth;

/// True once at least `interval_days` have passed since the last check-in
///
/// The distance is absolute, so a last check-in recorded in the future (clock
/// skew between devices) also counts.
#[must_use]
pub fn is_check_in_due(last_check_in: DateKey, today: DateKey, config: &CheckInConfig) -> bool {
    today.days_since(last_check_in).abs() >= config.interval_days
}

/// Days left until the next check-in, 0 when one is due
#[must_use]
pub fn days_until_check_in(last_check_in: DateKey, today: DateKey, config: &CheckInConfig) -> i64 {
    (config.interval_days - today.days_since(last_check_in).abs()).max(0)
}

/// Weight expected after the projection horizon if the stored goal is followed
///
/// Uses the stored survey as-is: `weight + (goal - maintenance) / kcal_per_kg * days`.
#[must_use]
pub fn predicted_weight(stored: &SurveyData, today: DateKey, config: &NutritionConfig) -> f64 {
    let goals = derive_goals(stored, today, config);
    project_weight(stored.weight, &goals, config)
}

fn project_weight(weight: f64, goals: &DerivedGoals, config: &NutritionConfig) -> f64 {
    let daily_change_kg = goals.daily_delta() as f64 / config.pacing.kcal_per_kg;
    daily_change_kg.mul_add(config.check_in.projection_days as f64, weight)
}

/// Goals recomputed for a new weight, not yet applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    /// Goals for the updated survey
    pub goals: DerivedGoals,
    /// Weight entered at the check-in (kg)
    pub new_weight: f64,
    /// Projected weight from the stored survey, one decimal (kg)
    pub predicted_weight: f64,
}

impl CheckInOutcome {
    /// Typed update that stores the new goals and refreshes the survey history
    ///
    /// Only `data.weight` and `last_check_in` change in the history; the
    /// original start date is kept.
    #[must_use]
    pub fn into_update(self, history: &SurveyHistory, today: DateKey) -> ProfileUpdate {
        let refreshed = SurveyHistory {
            start_date: history.start_date,
            data: history.data.with_weight(self.new_weight),
            last_check_in: today,
        };
        ProfileUpdate::from_goals(&self.goals).with_survey_history(refreshed)
    }
}

/// Recompute goals as if the stored survey had `new_weight`
#[must_use]
pub fn recalculate(
    stored: &SurveyData,
    new_weight: f64,
    today: DateKey,
    config: &NutritionConfig,
) -> CheckInOutcome {
    let goals = derive_goals(&stored.with_weight(new_weight), today, config);

    CheckInOutcome {
        goals,
        new_weight,
        predicted_weight: round_to_tenth(predicted_weight(stored, today, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nourish_core::models::{ActivityLevel, DateOfBirth, Gender, Goal};

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn stored() -> SurveyData {
        SurveyData {
            name: "Sam".to_owned(),
            goal: Goal::Lose,
            gender: Gender::Male,
            dob: Some(DateOfBirth::new(1994, 1, 1)),
            age: None,
            weight: 80.0,
            height: 180.0,
            activity_level: ActivityLevel::Sedentary,
            target_weight: 75.0,
            weekly_rate: Some(0.5),
        }
    }

    #[test]
    fn test_due_after_interval() {
        let config = CheckInConfig::default();
        let last = day("2024-01-01");
        assert!(!is_check_in_due(last, day("2024-01-30"), &config));
        assert!(is_check_in_due(last, day("2024-01-31"), &config));
        assert_eq!(days_until_check_in(last, day("2024-01-21"), &config), 10);
        assert_eq!(days_until_check_in(last, day("2024-03-01"), &config), 0);
    }

    #[test]
    fn test_future_last_check_in_counts_by_distance() {
        let config = CheckInConfig::default();
        assert!(is_check_in_due(day("2024-03-01"), day("2024-01-01"), &config));
    }

    #[test]
    fn test_recalculate_uses_new_weight() {
        let config = NutritionConfig::default();
        let today = day("2024-06-01");
        let outcome = recalculate(&stored(), 78.0, today, &config);

        let expected = derive_goals(&stored().with_weight(78.0), today, &config);
        assert_eq!(outcome.goals, expected);
        assert!((outcome.new_weight - 78.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_predicted_weight_from_stored_survey() {
        let config = NutritionConfig::default();
        let today = day("2024-06-01");
        // age 30: maintenance 2136, goal 1590, delta -546
        let predicted = predicted_weight(&stored(), today, &config);
        let expected = 80.0 + (-546.0 / 7700.0) * 30.0;
        assert!((predicted - expected).abs() < 1e-9);
        assert!((round_to_tenth(predicted) - 77.9).abs() < 1e-9);
    }

    #[test]
    fn test_into_update_refreshes_history() {
        let config = NutritionConfig::default();
        let history = SurveyHistory {
            start_date: day("2024-01-01"),
            data: stored(),
            last_check_in: day("2024-01-01"),
        };
        let today = day("2024-02-05");
        let outcome = recalculate(&history.data, 77.0, today, &config);
        let goals = outcome.goals;

        let update = outcome.into_update(&history, today);
        let refreshed = update.survey_history.unwrap();

        assert_eq!(refreshed.start_date, day("2024-01-01"));
        assert_eq!(refreshed.last_check_in, today);
        assert!((refreshed.data.weight - 77.0).abs() < f64::EPSILON);
        assert_eq!(refreshed.data.goal, Goal::Lose);
        assert_eq!(update.daily_goal, Some(goals.daily_goal));
        assert_eq!(update.maintenance_calories, Some(goals.maintenance_calories));
    }
}

// ABOUTME: Daily intake totals and multi-day progress reports against the stored goals
// ABOUTME: Formats the day's meals into the summary text handed to the insight generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nourish_core::models::{DaySummary, DerivedGoals, Meal};
use nourish_core::DateKey;
use serde::{Deserialize, Serialize};

/// Totals for one day's meals and water
#[must_use]
pub fn day_summary(date: DateKey, meals: &[Meal], water_ml: u32) -> DaySummary {
    DaySummary {
        date,
        calories: meals.iter().map(|m| m.calories).sum(),
        protein: meals.iter().map(|m| m.protein).sum(),
        water_ml,
    }
}

/// The last `days` days ending with `today`, oldest first
///
/// Allocates one entry per day; callers bound `days` (the tracker uses
/// `TrackingConfig::max_history_days`).
#[must_use]
pub fn history_window(today: DateKey, days: u32) -> Vec<DateKey> {
    (0..u64::from(days))
        .rev()
        .map(|offset| today.minus_days(offset))
        .collect()
}

/// Averages and goal attainment over a run of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// Per-day totals, oldest first
    pub days: Vec<DaySummary>,
    /// Mean calories per day (kcal)
    pub average_calories: f64,
    /// Mean protein per day (g)
    pub average_protein: f64,
    /// Mean water per day (mL)
    pub average_water_ml: f64,
    /// Days whose calories reached the calorie goal
    pub days_calorie_goal_met: usize,
    /// Days whose protein reached the protein goal
    pub days_protein_goal_met: usize,
    /// Days whose water reached the water goal
    pub days_water_goal_met: usize,
}

impl ProgressReport {
    /// Build a report from per-day totals
    #[must_use]
    pub fn from_days(days: Vec<DaySummary>, goals: &DerivedGoals) -> Self {
        let count = days.len().max(1) as f64;
        let mean = |f: fn(&DaySummary) -> f64| days.iter().map(f).sum::<f64>() / count;

        let average_calories = mean(|d| d.calories);
        let average_protein = mean(|d| d.protein);
        let average_water_ml = mean(|d| f64::from(d.water_ml));

        let calorie_goal = goals.daily_goal as f64;
        let protein_goal = goals.protein_goal as f64;
        let water_goal = goals.water_goal;

        let days_calorie_goal_met = days
            .iter()
            .filter(|d| calorie_goal > 0.0 && d.calories >= calorie_goal)
            .count();
        let days_protein_goal_met = days
            .iter()
            .filter(|d| protein_goal > 0.0 && d.protein >= protein_goal)
            .count();
        let days_water_goal_met = days
            .iter()
            .filter(|d| water_goal > 0 && i64::from(d.water_ml) >= water_goal)
            .count();

        Self {
            days,
            average_calories,
            average_protein,
            average_water_ml,
            days_calorie_goal_met,
            days_protein_goal_met,
            days_water_goal_met,
        }
    }
}

/// One line per meal, e.g. `- Oatmeal (~350 kcal, ~12g protein)`
#[must_use]
pub fn meal_summary(meals: &[Meal]) -> String {
    meals
        .iter()
        .map(|meal| {
            format!(
                "- {} (~{} kcal, ~{}g protein)",
                meal.name, meal.calories, meal.protein
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn goals() -> DerivedGoals {
        DerivedGoals {
            maintenance_calories: 2200,
            daily_goal: 1700,
            protein_goal: 100,
            water_goal: 2000,
        }
    }

    #[test]
    fn test_day_summary_sums_meals() {
        let meals = vec![Meal::new("Eggs", 200.0, 14.0), Meal::new("Rice", 300.5, 6.0)];
        let summary = day_summary(day("2024-01-10"), &meals, 600);
        assert!((summary.calories - 500.5).abs() < 1e-9);
        assert!((summary.protein - 20.0).abs() < 1e-9);
        assert_eq!(summary.water_ml, 600);
    }

    #[test]
    fn test_history_window_is_oldest_first() {
        let window = history_window(day("2024-01-10"), 10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0], day("2024-01-01"));
        assert_eq!(window[9], day("2024-01-10"));
    }

    #[test]
    fn test_report_averages_and_goal_days() {
        let days = vec![
            DaySummary {
                date: day("2024-01-09"),
                calories: 1800.0,
                protein: 90.0,
                water_ml: 2000,
            },
            DaySummary {
                date: day("2024-01-10"),
                calories: 1000.0,
                protein: 110.0,
                water_ml: 1000,
            },
        ];
        let report = ProgressReport::from_days(days, &goals());

        assert!((report.average_calories - 1400.0).abs() < 1e-9);
        assert!((report.average_water_ml - 1500.0).abs() < 1e-9);
        assert_eq!(report.days_calorie_goal_met, 1);
        assert_eq!(report.days_protein_goal_met, 1);
        assert_eq!(report.days_water_goal_met, 1);
    }

    #[test]
    fn test_empty_report_is_zero() {
        let report = ProgressReport::from_days(Vec::new(), &goals());
        assert!(report.average_calories.abs() < f64::EPSILON);
        assert_eq!(report.days_calorie_goal_met, 0);
    }

    #[test]
    fn test_meal_summary_lines() {
        let meals = vec![Meal::new("Oatmeal", 350.0, 12.5), Meal::new("Salad", 220.0, 8.0)];
        assert_eq!(
            meal_summary(&meals),
            "- Oatmeal (~350 kcal, ~12.5g protein)\n- Salad (~220 kcal, ~8g protein)"
        );
    }
}

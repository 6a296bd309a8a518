// ABOUTME: Goal-met streak counting, Sunday-based weekly progress, and goal-completion trigger
// ABOUTME: Also builds the current week's calendar and the weekly pace progress card
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Streak / Weekly-progress Aggregator
//!
//! A streak is the run of consecutive goal-met days ending today, or ending
//! yesterday when today is not yet met. Weekly progress counts goal-met days
//! in the current Sunday-started week and resets when a new week begins.

use std::array;

use nourish_core::constants::tracking::DAYS_IN_WEEK;
use nourish_core::models::{Goal, StreakData, SurveyData, WeeklyProgress};
use nourish_core::DateKey;
use serde::{Deserialize, Serialize};

use crate::config::StreakConfig;

/// Consecutive goal-met days ending today or yesterday
///
/// The walk stops after `max_lookback_days` so a corrupted history cannot
/// make it unbounded.
#[must_use]
pub fn current_streak(streak: &StreakData, today: DateKey, config: &StreakConfig) -> u32 {
    let mut day = if streak.is_completed(today) {
        today
    } else {
        today.pred()
    };

    let mut count = 0;
    while count < config.max_lookback_days && streak.is_completed(day) {
        count += 1;
        day = day.pred();
    }
    count
}

/// The Sunday on or before `date`
#[must_use]
pub fn week_start(date: DateKey) -> DateKey {
    date.week_start()
}

/// Weekly progress after the goal is met on `completion_date`
///
/// A completion in a different week than the stored one (or with nothing
/// stored) starts the new week at 1; otherwise the count grows, capped at 7.
#[must_use]
pub fn weekly_progress_on_completion(
    stored: Option<WeeklyProgress>,
    completion_date: DateKey,
) -> WeeklyProgress {
    let current_week = week_start(completion_date);
    match stored {
        Some(progress) if progress.week_start_date == current_week => WeeklyProgress {
            week_start_date: current_week,
            count: progress.count.saturating_add(1).min(DAYS_IN_WEEK),
        },
        _ => WeeklyProgress {
            week_start_date: current_week,
            count: 1,
        },
    }
}

/// True when today's calories reach the goal and today is not yet recorded
#[must_use]
pub fn should_trigger_goal_completion(
    total_calories: f64,
    daily_goal: i64,
    streak: &StreakData,
    today: DateKey,
) -> bool {
    daily_goal > 0 && total_calories >= daily_goal as f64 && !streak.is_completed(today)
}

/// One day in the weekly calendar strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// The day
    pub date: DateKey,
    /// Goal met on this day
    pub completed: bool,
    /// This day is today
    pub is_today: bool,
}

/// Sunday through Saturday of the week containing `today`
#[must_use]
pub fn week_calendar(streak: &StreakData, today: DateKey) -> [CalendarDay; 7] {
    let sunday = week_start(today);
    array::from_fn(|offset| {
        let date = sunday.plus_days(offset as u64);
        CalendarDay {
            date,
            completed: streak.is_completed(date),
            is_today: date == today,
        }
    })
}

/// Progress toward this week's share of the weekly weight target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoalProgress {
    /// Goal-met days this week, at most 7
    pub days_completed: u8,
    /// `days_completed / 7` as a percentage
    pub percentage: f64,
    /// Weight change earned so far this week (kg)
    pub achieved_kg: f64,
    /// Weekly target (kg)
    pub weekly_rate: f64,
}

impl WeeklyGoalProgress {
    /// Progress card for the survey's pace, `None` when there is no pace to track
    #[must_use]
    pub fn evaluate(progress: Option<&WeeklyProgress>, survey: &SurveyData) -> Option<Self> {
        let rate = survey.weekly_rate.filter(|_| survey.goal != Goal::Maintain)?;
        if rate.abs() < f64::EPSILON {
            return None;
        }

        let days_completed = progress.map_or(0, WeeklyProgress::capped_count);
        let fraction = f64::from(days_completed) / f64::from(DAYS_IN_WEEK);

        Some(Self {
            days_completed,
            percentage: fraction * 100.0,
            achieved_kg: fraction * rate,
            weekly_rate: rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_lookback_bound_stops_walk() {
        let streak: StreakData = (0..10)
            .map(|offset| (day("2024-01-10").minus_days(offset), true))
            .collect();
        let config = StreakConfig {
            max_lookback_days: 4,
        };
        assert_eq!(current_streak(&streak, day("2024-01-10"), &config), 4);
    }

    #[test]
    fn test_empty_streak_is_zero() {
        assert_eq!(
            current_streak(&StreakData::new(), day("2024-01-10"), &StreakConfig::default()),
            0
        );
    }

    #[test]
    fn test_weekly_progress_caps_at_seven() {
        let stored = WeeklyProgress {
            week_start_date: day("2024-01-07"),
            count: 7,
        };
        let next = weekly_progress_on_completion(Some(stored), day("2024-01-13"));
        assert_eq!(next.count, 7);
    }

    #[test]
    fn test_first_completion_without_stored_progress() {
        let next = weekly_progress_on_completion(None, day("2024-01-10"));
        assert_eq!(next.week_start_date, day("2024-01-07"));
        assert_eq!(next.count, 1);
    }

    #[test]
    fn test_trigger_rules() {
        let today = day("2024-01-10");
        let mut streak = StreakData::new();
        assert!(should_trigger_goal_completion(1710.0, 1710, &streak, today));
        assert!(!should_trigger_goal_completion(1709.9, 1710, &streak, today));
        assert!(!should_trigger_goal_completion(50.0, 0, &streak, today));

        streak.mark_completed(today);
        assert!(!should_trigger_goal_completion(3000.0, 1710, &streak, today));
    }

    #[test]
    fn test_week_calendar_runs_sunday_to_saturday() {
        let today = day("2024-01-10");
        let streak: StreakData = [(day("2024-01-08"), true)].into_iter().collect();
        let calendar = week_calendar(&streak, today);

        assert_eq!(calendar[0].date, day("2024-01-07"));
        assert_eq!(calendar[6].date, day("2024-01-13"));
        assert!(calendar[1].completed);
        assert!(calendar[3].is_today);
        assert_eq!(calendar.iter().filter(|d| d.is_today).count(), 1);
    }
}

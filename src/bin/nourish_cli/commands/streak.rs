// ABOUTME: Streak command for nourish-cli
// ABOUTME: Reports the current streak, the week calendar, and weekly progress after a completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use nourish_core::models::{StreakData, WeeklyProgress};
use nourish_core::DateKey;
use nourish_intelligence::{
    current_streak, week_calendar, weekly_progress_on_completion, CalendarDay, NutritionConfig,
};
use serde::Serialize;

use crate::helpers::display::print_json;
use crate::helpers::input::read_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StreakReport {
    today: DateKey,
    current_streak: u32,
    completed_today: bool,
    week: [CalendarDay; 7],
    #[serde(skip_serializing_if = "Option::is_none")]
    weekly_progress: Option<WeeklyProgress>,
    weekly_progress_if_completed_today: WeeklyProgress,
}

/// Print streak details for the data at `data_path`
pub fn run(
    data_path: &Path,
    stored: Option<(DateKey, u8)>,
    today: DateKey,
    config: &NutritionConfig,
) -> Result<()> {
    let streak: StreakData = read_json(data_path)?;
    let weekly_progress = stored.map(|(week_start_date, count)| WeeklyProgress {
        week_start_date,
        count,
    });

    print_json(&StreakReport {
        today,
        current_streak: current_streak(&streak, today, &config.streak),
        completed_today: streak.is_completed(today),
        week: week_calendar(&streak, today),
        weekly_progress,
        weekly_progress_if_completed_today: weekly_progress_on_completion(weekly_progress, today),
    })
}

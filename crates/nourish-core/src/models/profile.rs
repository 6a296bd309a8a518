// ABOUTME: Persisted user profile with goals, survey history, streak, and weekly progress
// ABOUTME: ProfileUpdate carries only changed fields and merges with defined precedence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{profile_defaults, tracking};
use crate::date_key::DateKey;
use crate::models::goals::DerivedGoals;
use crate::models::survey::SurveyData;

/// The onboarding survey plus check-in bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyHistory {
    /// Day onboarding was completed
    pub start_date: DateKey,
    /// Latest survey answers; `weight` is refreshed on each check-in
    pub data: SurveyData,
    /// Day of the most recent check-in (onboarding counts as one)
    pub last_check_in: DateKey,
}

/// Days on which the daily calorie goal was met
///
/// Append-only: entries are added at most once per day and never removed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakData(BTreeMap<DateKey, bool>);

impl StreakData {
    /// Empty streak history
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// True when the goal was met on `date`
    #[must_use]
    pub fn is_completed(&self, date: DateKey) -> bool {
        self.0.get(&date).copied().unwrap_or(false)
    }

    /// Record the goal as met on `date`; returns false if it already was
    pub fn mark_completed(&mut self, date: DateKey) -> bool {
        let entry = self.0.entry(date).or_insert(false);
        if *entry {
            false
        } else {
            *entry = true;
            true
        }
    }

    /// Number of recorded days
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = (DateKey, bool)> + '_ {
        self.0.iter().map(|(date, completed)| (*date, *completed))
    }
}

impl FromIterator<(DateKey, bool)> for StreakData {
    fn from_iter<I: IntoIterator<Item = (DateKey, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Count of goal-met days in the current Sunday-started week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    /// Sunday that starts the tracked week
    pub week_start_date: DateKey,
    /// Goal-met days this week, 0 to 7
    pub count: u8,
}

impl WeeklyProgress {
    /// Count clamped to the days in a week, for display
    #[must_use]
    pub fn capped_count(&self) -> u8 {
        self.count.min(tracking::DAYS_IN_WEEK)
    }
}

const fn default_daily_goal() -> i64 {
    profile_defaults::DAILY_GOAL
}

const fn default_protein_goal() -> i64 {
    profile_defaults::DAILY_PROTEIN_GOAL
}

const fn default_water_goal() -> i64 {
    profile_defaults::DAILY_WATER_GOAL
}

const fn default_maintenance() -> i64 {
    profile_defaults::MAINTENANCE_CALORIES
}

/// Everything stored for one user outside the per-day logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name
    #[serde(default)]
    pub user_name: String,
    /// Calorie goal (kcal)
    #[serde(default = "default_daily_goal")]
    pub daily_goal: i64,
    /// Protein goal (g)
    #[serde(default = "default_protein_goal")]
    pub daily_protein_goal: i64,
    /// Water goal (mL)
    #[serde(default = "default_water_goal")]
    pub daily_water_goal: i64,
    /// Maintenance calories (kcal)
    #[serde(default = "default_maintenance")]
    pub maintenance_calories: i64,
    /// Onboarding survey, absent until onboarding completes
    #[serde(default)]
    pub survey_history: Option<SurveyHistory>,
    /// Goal-met days
    #[serde(default)]
    pub streak_data: StreakData,
    /// Current week's goal-met count
    #[serde(default)]
    pub weekly_progress: Option<WeeklyProgress>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            daily_goal: default_daily_goal(),
            daily_protein_goal: default_protein_goal(),
            daily_water_goal: default_water_goal(),
            maintenance_calories: default_maintenance(),
            survey_history: None,
            streak_data: StreakData::new(),
            weekly_progress: None,
        }
    }
}

impl UserProfile {
    /// The goals currently in effect
    #[must_use]
    pub const fn goals(&self) -> DerivedGoals {
        DerivedGoals {
            maintenance_calories: self.maintenance_calories,
            daily_goal: self.daily_goal,
            protein_goal: self.daily_protein_goal,
            water_goal: self.daily_water_goal,
        }
    }

    /// True once the onboarding survey has been stored
    #[must_use]
    pub const fn has_completed_onboarding(&self) -> bool {
        self.survey_history.is_some()
    }

    /// Merge a partial update into this profile
    ///
    /// Every `Some` field in the update overwrites the stored value and `None`
    /// leaves it alone. Streak entries are appended; none are removed.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.user_name {
            self.user_name.clone_from(name);
        }
        if let Some(goal) = update.daily_goal {
            self.daily_goal = goal;
        }
        if let Some(protein) = update.daily_protein_goal {
            self.daily_protein_goal = protein;
        }
        if let Some(water) = update.daily_water_goal {
            self.daily_water_goal = water;
        }
        if let Some(maintenance) = update.maintenance_calories {
            self.maintenance_calories = maintenance;
        }
        if let Some(history) = &update.survey_history {
            self.survey_history = Some(history.clone());
        }
        if let Some(progress) = update.weekly_progress {
            self.weekly_progress = Some(progress);
        }
        for date in &update.streak_entries {
            self.streak_data.mark_completed(*date);
        }
    }
}

/// Partial profile write carrying only the fields being changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// New calorie goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<i64>,
    /// New protein goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_protein_goal: Option<i64>,
    /// New water goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_water_goal: Option<i64>,
    /// New maintenance calories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_calories: Option<i64>,
    /// Replacement survey history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_history: Option<SurveyHistory>,
    /// Replacement weekly progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_progress: Option<WeeklyProgress>,
    /// Days to mark as goal-met
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streak_entries: Vec<DateKey>,
}

impl ProfileUpdate {
    /// Update that replaces all four goals
    #[must_use]
    pub const fn from_goals(goals: &DerivedGoals) -> Self {
        Self {
            user_name: None,
            daily_goal: Some(goals.daily_goal),
            daily_protein_goal: Some(goals.protein_goal),
            daily_water_goal: Some(goals.water_goal),
            maintenance_calories: Some(goals.maintenance_calories),
            survey_history: None,
            weekly_progress: None,
            streak_entries: Vec::new(),
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    /// Replace the survey history
    #[must_use]
    pub fn with_survey_history(mut self, history: SurveyHistory) -> Self {
        self.survey_history = Some(history);
        self
    }

    /// Replace the weekly progress
    #[must_use]
    pub fn with_weekly_progress(mut self, progress: WeeklyProgress) -> Self {
        self.weekly_progress = Some(progress);
        self
    }

    /// Mark a day as goal-met
    #[must_use]
    pub fn with_streak_entry(mut self, date: DateKey) -> Self {
        self.streak_entries.push(date);
        self
    }

    /// True when applying this update would change nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

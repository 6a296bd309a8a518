// ABOUTME: Daily targets derived from survey answers
// ABOUTME: Calorie, protein, and water goals persisted on the user profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Daily targets computed by the goal calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedGoals {
    /// Estimated intake that keeps weight stable (kcal)
    pub maintenance_calories: i64,
    /// Calorie target for the user's goal direction and pace (kcal)
    pub daily_goal: i64,
    /// Protein target (g)
    pub protein_goal: i64,
    /// Water target (mL)
    pub water_goal: i64,
}

impl DerivedGoals {
    /// Signed daily calorie delta from maintenance (negative for a deficit)
    #[must_use]
    pub const fn daily_delta(&self) -> i64 {
        self.daily_goal - self.maintenance_calories
    }
}

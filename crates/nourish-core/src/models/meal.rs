// ABOUTME: Logged meals, vision-model meal estimates, and per-day intake summaries
// ABOUTME: Meal entries are stored per user per day and summed for daily progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_key::DateKey;

/// A meal entry in a day's log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique identifier
    pub id: Uuid,
    /// Short descriptive title
    pub name: String,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Captured photo as a data URL, if the meal was scanned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Meal {
    /// Create a meal with a fresh identifier and no image
    pub fn new(name: impl Into<String>, calories: f64, protein: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
            protein,
            image: None,
        }
    }
}

/// Structured estimate returned by the meal-analysis collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEstimate {
    /// Short descriptive title, e.g. "Bowl of Oatmeal with Berries"
    pub meal_name: String,
    /// Estimated energy (kcal)
    #[serde(default)]
    pub total_calories: f64,
    /// Estimated protein (g)
    #[serde(default)]
    pub total_protein: f64,
    /// Estimated portion weight (g)
    #[serde(default)]
    pub estimated_weight: f64,
}

/// Intake totals for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    /// Day the totals belong to
    pub date: DateKey,
    /// Sum of meal calories (kcal)
    pub calories: f64,
    /// Sum of meal protein (g)
    pub protein: f64,
    /// Water logged (mL)
    pub water_ml: u32,
}

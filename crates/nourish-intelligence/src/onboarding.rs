// ABOUTME: Step-by-step onboarding survey with guards and a conditional weekly-rate step
// ABOUTME: Finishing the survey derives goals and hands the result to the caller for persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Onboarding State Machine
//!
//! Nine ordered steps. The weekly-rate step is skipped in both directions
//! while the goal is "maintain". Leaving the name step needs a non-blank
//! name, and leaving the gender/birth-date step needs all three date parts.
//! Nothing here persists; [`OnboardingSurvey::finish`] returns a value the
//! service layer stores.

use nourish_core::models::{ActivityLevel, DateOfBirth, DerivedGoals, Gender, Goal, SurveyData};
use nourish_core::{AppError, AppResult, DateKey, ErrorCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NutritionConfig;
use crate::goal_calculator::derive_goals;
use crate::units::{format_height, HeightUnit};

/// Survey steps in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingStep {
    /// Display name
    Name,
    /// Lose, maintain, or gain
    Goal,
    /// Gender and date of birth
    GenderAndBirthDate,
    /// Current weight
    CurrentWeight,
    /// Height
    Height,
    /// Target weight
    TargetWeight,
    /// Weekly pace; skipped when maintaining
    WeeklyRate,
    /// Activity level
    ActivityLevel,
    /// Review before finishing
    Summary,
}

impl OnboardingStep {
    /// Every step in order
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Goal,
        Self::GenderAndBirthDate,
        Self::CurrentWeight,
        Self::Height,
        Self::TargetWeight,
        Self::WeeklyRate,
        Self::ActivityLevel,
        Self::Summary,
    ];

    /// Number of steps
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    fn clamped(index: usize) -> Self {
        Self::ALL[index.min(Self::COUNT - 1)]
    }
}

/// Date-of-birth field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DobPart {
    /// Day of month
    Day,
    /// Month
    Month,
    /// Year
    Year,
}

/// An in-progress onboarding survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSurvey {
    step: OnboardingStep,
    data: SurveyData,
    height_unit: HeightUnit,
}

impl Default for OnboardingSurvey {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingSurvey {
    /// Fresh survey on the first step with default answers
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("")
    }

    /// Fresh survey with the name pre-filled
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            step: OnboardingStep::Name,
            data: SurveyData {
                name: name.into(),
                goal: Goal::Lose,
                gender: Gender::Male,
                dob: Some(DateOfBirth::default()),
                age: None,
                weight: 70.0,
                height: 175.0,
                activity_level: ActivityLevel::Sedentary,
                target_weight: 65.0,
                weekly_rate: Some(0.5),
            },
            height_unit: HeightUnit::Cm,
        }
    }

    /// Current step
    #[must_use]
    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Answers collected so far
    #[must_use]
    pub const fn data(&self) -> &SurveyData {
        &self.data
    }

    /// Fraction of the survey completed, for a progress bar
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.step.index() as f64 / OnboardingStep::COUNT as f64
    }

    /// True on the summary step
    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step == OnboardingStep::Summary
    }

    /// Whether the current step's guard allows moving forward
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.blocked_reason().is_none()
    }

    fn blocked_reason(&self) -> Option<&'static str> {
        match self.step {
            OnboardingStep::Name if self.data.name.trim().is_empty() => Some("name is required"),
            OnboardingStep::GenderAndBirthDate
                if !self.data.dob.is_some_and(|dob| dob.is_complete()) =>
            {
                Some("date of birth needs day, month, and year")
            }
            _ => None,
        }
    }

    fn skips_weekly_rate(&self) -> bool {
        self.data.goal == Goal::Maintain
    }

    /// Move forward one step, skipping the weekly-rate step when maintaining
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::MissingRequiredField`] when the current step's guard
    /// fails; the step is left unchanged.
    pub fn next(&mut self) -> AppResult<OnboardingStep> {
        if let Some(reason) = self.blocked_reason() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                format!("Cannot leave onboarding step: {reason}"),
            ));
        }

        let mut index = self.step.index() + 1;
        if index == OnboardingStep::WeeklyRate.index() && self.skips_weekly_rate() {
            index += 1;
        }
        self.step = OnboardingStep::clamped(index);
        debug!(step = ?self.step, "Onboarding advanced");
        Ok(self.step)
    }

    /// Move back one step, skipping the weekly-rate step when maintaining
    pub fn prev(&mut self) -> OnboardingStep {
        let mut index = self.step.index().saturating_sub(1);
        if index == OnboardingStep::WeeklyRate.index() && self.skips_weekly_rate() {
            index -= 1;
        }
        self.step = OnboardingStep::clamped(index);
        self.step
    }

    /// Set the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.data.name = name.into();
    }

    /// Set the goal direction
    pub fn set_goal(&mut self, goal: Goal) {
        self.data.goal = goal;
    }

    /// Set the gender
    pub fn set_gender(&mut self, gender: Gender) {
        self.data.gender = gender;
    }

    /// Set or clear one part of the date of birth
    pub fn set_dob_part(&mut self, part: DobPart, value: Option<u32>) {
        let dob = self.data.dob.get_or_insert_with(DateOfBirth::default);
        match part {
            DobPart::Day => dob.day = value,
            DobPart::Month => dob.month = value,
            DobPart::Year => dob.year = value.and_then(|y| i32::try_from(y).ok()),
        }
    }

    /// Set the whole date of birth
    pub fn set_date_of_birth(&mut self, dob: DateOfBirth) {
        self.data.dob = Some(dob);
    }

    /// Set the current weight (kg)
    pub fn set_weight(&mut self, kg: f64) {
        self.data.weight = kg;
    }

    /// Set the height (cm)
    pub fn set_height(&mut self, cm: f64) {
        self.data.height = cm;
    }

    /// Set the target weight (kg)
    pub fn set_target_weight(&mut self, kg: f64) {
        self.data.target_weight = kg;
    }

    /// Set the weekly pace (kg/week)
    pub fn set_weekly_rate(&mut self, kg_per_week: f64) {
        self.data.weekly_rate = Some(kg_per_week);
    }

    /// Set the activity level
    pub fn set_activity_level(&mut self, level: ActivityLevel) {
        self.data.activity_level = level;
    }

    /// Unit used when displaying height
    #[must_use]
    pub const fn height_unit(&self) -> HeightUnit {
        self.height_unit
    }

    /// Switch the height display unit
    pub fn toggle_height_unit(&mut self) {
        self.height_unit = self.height_unit.toggled();
    }

    /// Height formatted in the current display unit
    #[must_use]
    pub fn height_display(&self) -> String {
        format_height(self.data.height, self.height_unit)
    }

    /// Compute goals from the collected answers
    ///
    /// The survey is returned unchanged inside the result; a weekly rate
    /// entered before switching to "maintain" is kept and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::MissingRequiredField`] if the name is blank or the
    /// date of birth is incomplete.
    pub fn finish(&self, today: DateKey, config: &NutritionConfig) -> AppResult<OnboardingResult> {
        if self.data.name.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Onboarding requires a name",
            ));
        }
        if !self.data.dob.is_some_and(|dob| dob.is_complete()) {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Onboarding requires a complete date of birth",
            ));
        }

        let goals = derive_goals(&self.data, today, config);
        debug!(
            daily_goal = goals.daily_goal,
            maintenance = goals.maintenance_calories,
            "Onboarding finished"
        );

        Ok(OnboardingResult {
            name: self.data.name.trim().to_owned(),
            goal: goals.daily_goal,
            maintenance: goals.maintenance_calories,
            protein_goal: goals.protein_goal,
            water_goal: goals.water_goal,
            initial_survey: self.data.clone(),
        })
    }
}

/// Goals and survey produced by a finished onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResult {
    /// Display name
    pub name: String,
    /// Daily calorie goal (kcal)
    pub goal: i64,
    /// Maintenance calories (kcal)
    pub maintenance: i64,
    /// Protein goal (g)
    pub protein_goal: i64,
    /// Water goal (mL)
    pub water_goal: i64,
    /// Survey answers as submitted
    pub initial_survey: SurveyData,
}

impl OnboardingResult {
    /// The four derived goals
    #[must_use]
    pub const fn goals(&self) -> DerivedGoals {
        DerivedGoals {
            maintenance_calories: self.maintenance,
            daily_goal: self.goal,
            protein_goal: self.protein_goal,
            water_goal: self.water_goal,
        }
    }
}

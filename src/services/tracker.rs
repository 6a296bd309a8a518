// ABOUTME: Nutrition tracker service wiring storage, clock, goal engine, and model collaborators
// ABOUTME: Implements onboarding, check-ins, meal and water logging, summaries, and insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use nourish_core::models::{
    DerivedGoals, Meal, ProfileUpdate, SurveyHistory, UserProfile, WeeklyProgress,
};
use nourish_core::{AppError, AppResult, DateKey, ErrorCode};
use nourish_intelligence::check_in::{days_until_check_in, is_check_in_due, recalculate};
use nourish_intelligence::streak::{
    current_streak, should_trigger_goal_completion, week_calendar, week_start,
    weekly_progress_on_completion,
};
use nourish_intelligence::trends::{day_summary, history_window, meal_summary};
use nourish_intelligence::{
    CalendarDay, CaloriePlan, CheckInOutcome, MealDraft, NutritionConfig, OnboardingResult,
    ProgressReport, WeeklyGoalProgress,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::ServerConfig;
use crate::database::{self, ProfileStore, StoreEvent};
use crate::llm::{prompts, GeminiClient, InsightGenerator, MealAnalyzer};

/// Result of logging a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLogged {
    /// The stored meal
    pub meal: Meal,
    /// Calories logged today including this meal (kcal)
    pub total_calories: f64,
    /// Updated weekly progress when this meal completed today's goal
    pub goal_completed: Option<WeeklyProgress>,
}

/// Everything the dashboard shows for today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    /// Today
    pub date: DateKey,
    /// Display name
    pub user_name: String,
    /// Meals logged today
    pub meals: Vec<Meal>,
    /// Calories logged today (kcal)
    pub calories: f64,
    /// Protein logged today (g)
    pub protein: f64,
    /// Water logged today (mL)
    pub water_ml: u32,
    /// Goals in effect
    pub goals: DerivedGoals,
    /// Calories left before reaching the goal, never negative (kcal)
    pub remaining_calories: f64,
    /// Consecutive goal-met days
    pub streak: u32,
    /// Sunday-to-Saturday completion strip
    pub week: [CalendarDay; 7],
    /// Weekly pace card, when the survey sets a pace
    pub weekly_goal: Option<WeeklyGoalProgress>,
    /// Maintenance vs goal breakdown, once onboarding is complete
    pub calorie_plan: Option<CaloriePlan>,
    /// Whether a weight check-in is due
    pub check_in_due: bool,
    /// Days until the next check-in, once onboarding is complete
    pub days_until_check_in: Option<i64>,
}

/// Nutrition tracker
pub struct NutritionTracker {
    store: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
    config: NutritionConfig,
    analyzer: Option<Arc<dyn MealAnalyzer>>,
    insights: Option<Arc<dyn InsightGenerator>>,
}

impl NutritionTracker {
    /// Create a tracker without model collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn ProfileStore>,
        clock: Arc<dyn Clock>,
        config: NutritionConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config,
            analyzer: None,
            insights: None,
        }
    }

    /// Attach a meal photo analyzer
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Arc<dyn MealAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Attach an insight generator
    #[must_use]
    pub fn with_insights(mut self, insights: Arc<dyn InsightGenerator>) -> Self {
        self.insights = Some(insights);
        self
    }

    /// Build a tracker from service configuration
    ///
    /// Opens the configured store, uses the system clock, and attaches Gemini
    /// for both collaborators when an API key is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the Gemini client cannot be built
    pub async fn from_config(config: &ServerConfig, nutrition: NutritionConfig) -> AppResult<Self> {
        let store = database::connect(&config.database).await?;
        let tracker = Self::new(store, Arc::new(SystemClock), nutrition);

        if config.gemini.is_enabled() {
            let gemini = Arc::new(GeminiClient::new(&config.gemini)?);
            info!(model = gemini.model(), "Gemini collaborators enabled");
            Ok(tracker
                .with_analyzer(gemini.clone())
                .with_insights(gemini))
        } else {
            info!("GEMINI_API_KEY not set; meal scanning and insights disabled");
            Ok(tracker)
        }
    }

    /// Nutrition configuration in use
    #[must_use]
    pub const fn config(&self) -> &NutritionConfig {
        &self.config
    }

    /// Today according to the tracker's clock
    #[must_use]
    pub fn today(&self) -> DateKey {
        self.clock.today()
    }

    /// Receive store changes
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }

    /// Stored profile, if any
    ///
    /// # Errors
    ///
    /// Returns a database error if the store read fails
    pub async fn profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.store.get_profile(user_id).await
    }

    async fn require_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(user_id))
    }

    async fn require_survey(&self, user_id: Uuid) -> AppResult<SurveyHistory> {
        self.require_profile(user_id)
            .await?
            .survey_history
            .ok_or_else(|| AppError::not_found("Survey history").with_user_id(user_id))
    }

    // ------------------------------------------------------------------------
    // Onboarding and check-ins
    // ------------------------------------------------------------------------

    /// Store the goals and survey from a finished onboarding
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the user has already onboarded
    #[instrument(skip(self, result))]
    pub async fn complete_onboarding(
        &self,
        user_id: Uuid,
        result: OnboardingResult,
    ) -> AppResult<UserProfile> {
        let existing = self.store.get_profile(user_id).await?;
        if existing.is_some_and(|p| p.has_completed_onboarding()) {
            return Err(AppError::already_exists("Survey history").with_user_id(user_id));
        }

        let today = self.today();
        let goals = result.goals();
        let update = ProfileUpdate::from_goals(&goals)
            .with_user_name(result.name)
            .with_survey_history(SurveyHistory {
                start_date: today,
                data: result.initial_survey,
                last_check_in: today,
            })
            .with_weekly_progress(WeeklyProgress {
                week_start_date: week_start(today),
                count: 0,
            });

        let profile = self.store.upsert_profile(user_id, &update).await?;
        info!(daily_goal = goals.daily_goal, "Onboarding completed");
        Ok(profile)
    }

    /// Whether the monthly weight check-in is due
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile
    pub async fn check_in_due(&self, user_id: Uuid) -> AppResult<bool> {
        let profile = self.require_profile(user_id).await?;
        Ok(profile
            .survey_history
            .is_some_and(|h| is_check_in_due(h.last_check_in, self.today(), &self.config.check_in)))
    }

    /// Recompute goals for a new weight without storing them
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive weight and `ResourceNotFound`
    /// when the user has not onboarded
    #[instrument(skip(self))]
    pub async fn preview_check_in(&self, user_id: Uuid, weight: f64) -> AppResult<CheckInOutcome> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AppError::invalid_input("Weight must be a positive number"));
        }
        let history = self.require_survey(user_id).await?;
        Ok(recalculate(&history.data, weight, self.today(), &self.config))
    }

    /// Store a previewed check-in
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has not onboarded
    #[instrument(skip(self, outcome))]
    pub async fn apply_check_in(
        &self,
        user_id: Uuid,
        outcome: CheckInOutcome,
    ) -> AppResult<UserProfile> {
        let history = self.require_survey(user_id).await?;
        let update = outcome.into_update(&history, self.today());
        let profile = self.store.upsert_profile(user_id, &update).await?;
        info!(daily_goal = profile.daily_goal, "Check-in applied");
        Ok(profile)
    }

    // ------------------------------------------------------------------------
    // Daily logging
    // ------------------------------------------------------------------------

    /// Log a meal for today and record goal completion the first time today's calories reach the goal
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile, or a store error
    #[instrument(skip(self, meal), fields(meal_id = %meal.id))]
    pub async fn log_meal(&self, user_id: Uuid, meal: Meal) -> AppResult<MealLogged> {
        let profile = self.require_profile(user_id).await?;
        let today = self.today();

        self.store.append_meal(user_id, today, &meal).await?;
        let meals = self.store.meals_for_day(user_id, today).await?;
        let total_calories: f64 = meals.iter().map(|m| m.calories).sum();

        let goal_completed = if should_trigger_goal_completion(
            total_calories,
            profile.daily_goal,
            &profile.streak_data,
            today,
        ) {
            let progress = weekly_progress_on_completion(profile.weekly_progress, today);
            let update = ProfileUpdate::default()
                .with_streak_entry(today)
                .with_weekly_progress(progress);
            self.store.upsert_profile(user_id, &update).await?;
            info!(count = progress.count, "Daily calorie goal reached");
            Some(progress)
        } else {
            None
        };

        Ok(MealLogged {
            meal,
            total_calories,
            goal_completed,
        })
    }

    /// Remove one of today's meals
    ///
    /// Removing a meal never un-marks a day already recorded as goal-met.
    ///
    /// # Errors
    ///
    /// Returns a store error if the delete fails
    pub async fn remove_meal(&self, user_id: Uuid, meal_id: Uuid) -> AppResult<bool> {
        self.store.remove_meal(user_id, self.today(), meal_id).await
    }

    /// Add one glass of water to today's total
    ///
    /// # Errors
    ///
    /// Returns a store error if the write fails
    pub async fn add_water(&self, user_id: Uuid) -> AppResult<u32> {
        self.store
            .add_water(user_id, self.today(), self.config.tracking.water_increment_ml)
            .await
    }

    /// Dashboard view for today
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile
    #[instrument(skip(self))]
    pub async fn today_summary(&self, user_id: Uuid) -> AppResult<TodaySummary> {
        let profile = self.require_profile(user_id).await?;
        let today = self.today();
        let meals = self.store.meals_for_day(user_id, today).await?;
        let water_ml = self.store.water_for_day(user_id, today).await?;
        let totals = day_summary(today, &meals, water_ml);
        let goals = profile.goals();

        let survey = profile.survey_history.as_ref();
        let weekly_goal = survey.and_then(|h| {
            WeeklyGoalProgress::evaluate(profile.weekly_progress.as_ref(), &h.data)
        });
        let calorie_plan = survey.map(|h| CaloriePlan::from_goals(&goals, h.data.goal));
        let check_in_due =
            survey.is_some_and(|h| is_check_in_due(h.last_check_in, today, &self.config.check_in));
        let days_until =
            survey.map(|h| days_until_check_in(h.last_check_in, today, &self.config.check_in));

        Ok(TodaySummary {
            date: today,
            user_name: profile.user_name.clone(),
            calories: totals.calories,
            protein: totals.protein,
            water_ml,
            goals,
            remaining_calories: (goals.daily_goal as f64 - totals.calories).max(0.0),
            streak: current_streak(&profile.streak_data, today, &self.config.streak),
            week: week_calendar(&profile.streak_data, today),
            weekly_goal,
            calorie_plan,
            check_in_due,
            days_until_check_in: days_until,
            meals,
        })
    }

    /// Per-day totals and goal attainment for the last `days` days, ending today
    ///
    /// `None` uses the configured history window.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `days` exceeds the configured maximum and
    /// `ResourceNotFound` when the user has no profile
    #[instrument(skip(self))]
    pub async fn history(&self, user_id: Uuid, days: Option<u32>) -> AppResult<ProgressReport> {
        let days = days.unwrap_or(self.config.tracking.history_window_days);
        let max_days = self.config.tracking.max_history_days;
        if days > max_days {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("History is limited to {max_days} days, {days} requested"),
            )
            .with_user_id(user_id));
        }
        let profile = self.require_profile(user_id).await?;

        let mut summaries = Vec::with_capacity(days as usize);
        for date in history_window(self.today(), days) {
            let meals = self.store.meals_for_day(user_id, date).await?;
            let water_ml = self.store.water_for_day(user_id, date).await?;
            summaries.push(day_summary(date, &meals, water_ml));
        }

        Ok(ProgressReport::from_days(summaries, &profile.goals()))
    }

    // ------------------------------------------------------------------------
    // Model collaborators
    // ------------------------------------------------------------------------

    /// Estimate a meal from JPEG bytes and return an editable draft
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` without an analyzer, `InvalidInput` for an empty
    /// image, or the analyzer's error
    #[instrument(skip(self, image_jpeg), fields(bytes = image_jpeg.len()))]
    pub async fn analyze_meal(&self, image_jpeg: &[u8]) -> AppResult<MealDraft> {
        let analyzer = self
            .analyzer
            .as_ref()
            .ok_or_else(|| AppError::config_missing("Meal analysis is not configured"))?;
        if image_jpeg.is_empty() {
            return Err(AppError::invalid_input("Image is empty"));
        }

        let encoded = BASE64.encode(image_jpeg);
        let estimate = analyzer
            .analyze_meal(&encoded, prompts::MEAL_ANALYSIS_PROMPT)
            .await?;
        debug!(meal = %estimate.meal_name, "Meal estimate received");
        Ok(MealDraft::from_estimate(&estimate))
    }

    /// Coaching paragraph about today's meals
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` without a generator, `InvalidInput` when nothing
    /// is logged today, or the generator's error
    #[instrument(skip(self))]
    pub async fn meal_insight(&self, user_id: Uuid) -> AppResult<String> {
        let insights = self
            .insights
            .as_ref()
            .ok_or_else(|| AppError::config_missing("Meal insights are not configured"))?;
        let profile = self.require_profile(user_id).await?;
        let meals = self.store.meals_for_day(user_id, self.today()).await?;
        if meals.is_empty() {
            return Err(AppError::invalid_input(
                "Log at least one meal before asking for an insight",
            ));
        }

        insights
            .meal_insight(
                &meal_summary(&meals),
                profile.daily_goal,
                profile.daily_protein_goal,
            )
            .await
    }
}

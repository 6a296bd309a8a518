// ABOUTME: Vision and text model collaborators used for meal scanning and daily insights
// ABOUTME: Defines the MealAnalyzer and InsightGenerator traits and the Gemini implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Model Collaborators
//!
//! Meal photos and daily meal lists are sent to a hosted model. The tracker
//! only depends on the two traits here, so tests can substitute fakes and a
//! missing API key simply leaves the features unavailable.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nourish::config::GeminiConfig;
//! use nourish::llm::{GeminiClient, MealAnalyzer, prompts};
//!
//! # async fn example(image_b64: &str) -> nourish_core::AppResult<()> {
//! let config = GeminiConfig {
//!     api_key: Some("key".to_owned()),
//!     ..GeminiConfig::default()
//! };
//! let client = GeminiClient::new(&config)?;
//! let estimate = client.analyze_meal(image_b64, prompts::MEAL_ANALYSIS_PROMPT).await?;
//! println!("{} ~{} kcal", estimate.meal_name, estimate.total_calories);
//! # Ok(())
//! # }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use nourish_core::models::MealEstimate;
use nourish_core::AppResult;

/// Estimates name, calories, protein, and weight from a meal photo
#[async_trait]
pub trait MealAnalyzer: Send + Sync {
    /// Analyze a base64-encoded JPEG
    ///
    /// # Errors
    ///
    /// Returns an error if the model call fails or the reply is not a valid estimate
    async fn analyze_meal(&self, image_jpeg_base64: &str, prompt: &str)
        -> AppResult<MealEstimate>;
}

/// Produces a short coaching paragraph about the day's meals
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Generate an insight for a meal summary and the user's goals
    ///
    /// # Errors
    ///
    /// Returns an error if the model call fails or returns no text
    async fn meal_insight(
        &self,
        meal_summary: &str,
        daily_goal: i64,
        daily_protein_goal: i64,
    ) -> AppResult<String>;
}

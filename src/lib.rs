// ABOUTME: Main library entry point for the Nourish nutrition tracker
// ABOUTME: Wires storage, clock, configuration, logging, and model collaborators around the goal engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nourish
//!
//! Calorie, protein, and water tracking built on the deterministic goal
//! engine in `nourish-intelligence`.
//!
//! ## Architecture
//!
//! - **config**: Environment configuration for storage and Gemini
//! - **logging**: Structured `tracing` setup
//! - **clock**: Source of "today"
//! - **database**: `ProfileStore` with in-memory and SQLite backends
//! - **llm**: Meal photo analysis and insight collaborators
//! - **services**: The `NutritionTracker` that ties them together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nourish::config::ServerConfig;
//! use nourish::services::NutritionTracker;
//! use nourish_intelligence::NutritionConfig;
//!
//! #[tokio::main]
//! async fn main() -> nourish_core::AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let tracker = NutritionTracker::from_config(&config, NutritionConfig::default()).await?;
//!     println!("Tracking for {}", tracker.today());
//!     Ok(())
//! }
//! ```

/// Source of the current calendar day
pub mod clock;

/// Environment configuration
pub mod config;

/// Profile and daily log persistence
pub mod database;

/// Model collaborators for meal scanning and insights
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain services
pub mod services;

pub use nourish_core::{AppError, AppResult, DateKey, ErrorCode};

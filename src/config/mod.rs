// ABOUTME: Configuration module for service settings
// ABOUTME: Environment-driven storage, Gemini, and logging configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Nourish
//!
//! - **Environment**: Storage backend, Gemini settings, and logging from environment variables
//!
//! Nutrition coefficients live in [`nourish_intelligence::config`].

/// Environment and service configuration
pub mod environment;

pub use environment::{DatabaseUrl, GeminiConfig, ServerConfig};

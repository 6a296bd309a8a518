// ABOUTME: Core types and constants for the Nourish nutrition tracker
// ABOUTME: Foundation crate with error handling, date keys, and survey/profile models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nourish Core
//!
//! Foundation crate providing shared types and constants for the Nourish
//! nutrition tracker. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **date_key**: `YYYY-MM-DD` day keys and week arithmetic
//! - **models**: Survey answers, derived goals, meals, and user profiles

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Calendar day keys used to index daily documents
pub mod date_key;

/// Core data models (survey, goals, meals, profile)
pub mod models;

pub use date_key::DateKey;
pub use errors::{AppError, AppResult, ErrorCode, ErrorResponse};

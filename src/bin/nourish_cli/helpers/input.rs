// ABOUTME: Input helpers for nourish-cli
// ABOUTME: Reads JSON documents from disk and resolves the effective "today"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use nourish::clock::{Clock, SystemClock};
use nourish_core::{AppError, AppResult, DateKey, ErrorCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Parse a JSON file into `T`
///
/// # Errors
///
/// Returns `InvalidInput` when the file cannot be read and `InvalidFormat`
/// when it does not hold the expected JSON
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Failed to read {}: {e}", path.display())).with_source(e)
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "Read input file");
    serde_json::from_str(&raw).map_err(|e| {
        AppError::new(
            ErrorCode::InvalidFormat,
            format!("Invalid JSON in {}: {e}", path.display()),
        )
        .with_source(e)
    })
}

/// The override if given, otherwise the system clock's day
pub fn resolve_today(today: Option<DateKey>) -> DateKey {
    today.unwrap_or_else(|| SystemClock.today())
}

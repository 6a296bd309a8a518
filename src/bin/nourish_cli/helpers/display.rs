// ABOUTME: Output formatting helpers for nourish-cli
// ABOUTME: Writes results and failures as pretty JSON on stdout so they can be piped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Error, Result};
use nourish_core::{AppError, ErrorResponse};
use serde::Serialize;

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Structured form of a command failure
///
/// Application errors keep their code and details; anything else is reported
/// as an internal error.
pub fn error_response(error: &Error) -> ErrorResponse {
    error.downcast_ref::<AppError>().map_or_else(
        || ErrorResponse::from(&AppError::internal(error.to_string())),
        ErrorResponse::from,
    )
}

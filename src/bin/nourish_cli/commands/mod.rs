// ABOUTME: Re-exports command modules for nourish-cli
// ABOUTME: Provides the goals, check-in, and streak commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod check_in;
pub mod goals;
pub mod streak;

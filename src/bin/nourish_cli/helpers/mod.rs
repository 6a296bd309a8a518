// ABOUTME: Re-exports helper modules for nourish-cli
// ABOUTME: Provides file input parsing and JSON output helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod input;

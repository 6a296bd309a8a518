// ABOUTME: Nourish CLI - command-line access to the goal engine for survey and streak files
// ABOUTME: Prints derived goals, check-in recalculations, and streak calendars as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Goals, calorie plan, and height display for a survey
//! nourish-cli goals --survey survey.json --today 2024-06-15
//!
//! # Recalculate goals after a weigh-in
//! nourish-cli check-in --survey survey.json --weight 78.5
//!
//! # Current streak and this week's calendar
//! nourish-cli streak --data streak.json --week-start 2024-01-07 --count 2
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nourish::logging::LoggingConfig;
use nourish_core::{AppError, DateKey};
use nourish_intelligence::NutritionConfig;
use tracing::{debug, warn};

use crate::helpers::display::{error_response, print_json};

#[derive(Parser)]
#[command(
    name = "nourish-cli",
    about = "Nourish nutrition goal calculator",
    long_about = "Command-line access to the Nourish goal engine: derive goals from a survey, \
                  recalculate them at a check-in, and inspect streak data."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Day to treat as today (YYYY-MM-DD); defaults to the current UTC date
    #[arg(long, global = true)]
    today: Option<DateKey>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Derive goals from a survey JSON file
    Goals {
        /// Survey answers (camelCase JSON)
        #[arg(long)]
        survey: PathBuf,
    },

    /// Recalculate goals for a new weight
    CheckIn {
        /// Stored survey answers (camelCase JSON)
        #[arg(long)]
        survey: PathBuf,

        /// Weight entered at the check-in (kg)
        #[arg(long)]
        weight: f64,

        /// Date of the previous check-in, to report whether one is due
        #[arg(long)]
        last_check_in: Option<DateKey>,
    },

    /// Show the current streak and this week's calendar
    Streak {
        /// Streak data: a JSON object of `YYYY-MM-DD` to `true`
        #[arg(long)]
        data: PathBuf,

        /// Stored week start (Sunday) of the weekly progress
        #[arg(long, requires = "count")]
        week_start: Option<DateKey>,

        /// Stored goal-met count for that week
        #[arg(long, requires = "week_start")]
        count: Option<u8>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_cli();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    // Failures are also printed as an error document so scripts can branch on the code
    run(cli).inspect_err(|e| {
        if let Err(print_err) = print_json(&error_response(e)) {
            warn!(error = %print_err, "Failed to print error document");
        }
    })
}

fn run(cli: Cli) -> Result<()> {
    let config = NutritionConfig::load().map_err(|e| AppError::config(e.to_string()))?;
    let today = helpers::input::resolve_today(cli.today);
    debug!(today = %today, "Resolved today");

    match cli.command {
        Command::Goals { survey } => commands::goals::run(&survey, today, &config)?,
        Command::CheckIn {
            survey,
            weight,
            last_check_in,
        } => commands::check_in::run(&survey, weight, last_check_in, today, &config)?,
        Command::Streak {
            data,
            week_start,
            count,
        } => commands::streak::run(&data, week_start.zip(count), today, &config)?,
    }

    Ok(())
}

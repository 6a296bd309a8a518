// ABOUTME: Logging configuration and structured logging setup for the tracker service and CLI
// ABOUTME: Selects JSON, pretty, or compact output and applies dependency noise reduction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use std::env;
use std::io;

use anyhow::Result;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Service name reported in startup logs
pub const SERVICE_NAME: &str = "nourish";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for CLI output
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Quiet configuration for command-line use: compact, warnings only
    #[must_use]
    pub fn for_cli() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            ..Self::default()
        }
    }

    /// Filter built from `RUST_LOG` (or the configured level) plus noise reduction
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").map_or_else(
            |_| EnvFilter::new(&self.level),
            |env_directive| EnvFilter::new(&env_directive),
        );

        // Always apply noise reduction regardless of RUST_LOG setting
        [
            ("hyper=warn", Level::WARN),
            ("reqwest=warn", Level::WARN),
            ("sqlx=info", Level::INFO),
            ("sqlx::query=warn", Level::WARN),
        ]
        .into_iter()
        .fold(base, |filter, (directive, fallback)| {
            filter.add_directive(directive.parse().unwrap_or_else(|_| fallback.into()))
        })
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events())
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events());
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                // stderr keeps CLI stdout clean for JSON output
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Nourish starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "spans": self.include_spans
            }
        });
        info!("Logging configured: {}", config_summary);
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_reads_format_and_environment() {
        env::set_var("LOG_FORMAT", "json");
        env::set_var("ENVIRONMENT", "production");
        let config = LoggingConfig::from_env();
        env::remove_var("LOG_FORMAT");
        env::remove_var("ENVIRONMENT");

        assert_eq!(config.format, LogFormat::Json);
        assert!(config.include_location);
        assert_eq!(config.environment, "production");
    }

    #[test]
    #[serial]
    fn test_unknown_format_falls_back_to_pretty() {
        env::set_var("LOG_FORMAT", "xml");
        let config = LoggingConfig::from_env();
        env::remove_var("LOG_FORMAT");

        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_cli_config_is_quiet() {
        let config = LoggingConfig::for_cli();
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, "warn");
    }
}

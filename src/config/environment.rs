// ABOUTME: Environment configuration for storage selection and the Gemini collaborator
// ABOUTME: Reads DATABASE_URL and GEMINI_* variables; secrets never have defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::time::Duration;

use nourish_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::logging::LoggingConfig;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/nourish.db";

/// Default Gemini model for meal analysis and insights
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini request timeout in seconds
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;

/// Where profiles and daily logs are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// Process-local store, lost on exit
    Memory,
    /// SQLite connection string, e.g. `sqlite:./data/nourish.db` or `sqlite::memory:`
    Sqlite {
        /// Connection string passed to sqlx
        url: String,
    },
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// `memory` selects the in-process store. Anything starting with `sqlite:`
    /// is used as given; a bare path is treated as a SQLite file.
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("memory") {
            Self::Memory
        } else if trimmed.starts_with("sqlite:") {
            Self::Sqlite {
                url: trimmed.to_owned(),
            }
        } else {
            Self::Sqlite {
                url: format!("sqlite:{trimmed}"),
            }
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Sqlite { url } => f.write_str(url),
        }
    }
}

/// Gemini collaborator settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; meal analysis and insights are disabled without one
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// True when an API key is present
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend
    pub database: DatabaseUrl,
    /// Gemini collaborator
    pub gemini: GeminiConfig,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `GEMINI_TIMEOUT_SECS` is not a positive integer
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let database = DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL));

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let timeout_secs: u64 = env_var_or(
            "GEMINI_TIMEOUT_SECS",
            &DEFAULT_GEMINI_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .map_err(|e| AppError::config(format!("Invalid GEMINI_TIMEOUT_SECS value: {e}")))?;
        if timeout_secs == 0 {
            return Err(AppError::config("GEMINI_TIMEOUT_SECS must be positive"));
        }

        let gemini = GeminiConfig {
            api_key,
            model: env_var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            base_url: env_var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            timeout: Duration::from_secs(timeout_secs),
        };

        let config = Self {
            database,
            gemini,
            logging: LoggingConfig::from_env(),
        };
        info!(
            database = %config.database,
            gemini_enabled = config.gemini.is_enabled(),
            gemini_model = %config.gemini.model,
            "Configuration loaded"
        );
        Ok(config)
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_database_url() {
        assert_eq!(DatabaseUrl::parse_url("memory"), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:"),
            DatabaseUrl::Sqlite {
                url: "sqlite::memory:".to_owned()
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("/tmp/n.db"),
            DatabaseUrl::Sqlite {
                url: "sqlite:/tmp/n.db".to_owned()
            }
        );
        assert_eq!(DatabaseUrl::default().to_string(), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GeminiConfig {
            api_key: Some("secret-key".to_owned()),
            ..GeminiConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_and_overrides() {
        env::remove_var("DATABASE_URL");
        env::remove_var("GEMINI_API_KEY");
        env::set_var("GEMINI_MODEL", "gemini-test");
        env::set_var("GEMINI_BASE_URL", "http://localhost:1234/");
        let config = ServerConfig::from_env().unwrap();
        env::remove_var("GEMINI_MODEL");
        env::remove_var("GEMINI_BASE_URL");

        assert_eq!(config.database.to_string(), DEFAULT_DATABASE_URL);
        assert!(!config.gemini.is_enabled());
        assert_eq!(config.gemini.model, "gemini-test");
        assert_eq!(config.gemini.base_url, "http://localhost:1234");
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_is_config_error() {
        env::set_var("GEMINI_TIMEOUT_SECS", "soon");
        let result = ServerConfig::from_env();
        env::remove_var("GEMINI_TIMEOUT_SECS");

        assert!(result.is_err());
    }
}

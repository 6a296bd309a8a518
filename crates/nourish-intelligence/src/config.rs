// ABOUTME: Nutrition engine configuration for BMR, activity, protein, hydration, and pacing
// ABOUTME: Environment overrides with NOURISH_ prefix, validation, and a process-wide singleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Engine Configuration
//!
//! Every coefficient used by the calculators lives here so a deployment can
//! tune them without a rebuild.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Energy density of body tissue: Wishnofsky (1958), 3500 kcal/lb (~7700 kcal/kg)

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use nourish_core::constants::{energy, tracking};
use nourish_core::models::ActivityLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Global configuration singleton
static NUTRITION_CONFIG: OnceLock<NutritionConfig> = OnceLock::new();

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid range between two related values
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable held an unparseable value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Value outside its permitted range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// One value per [`ActivityLevel`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerActivity<T> {
    /// Little or no exercise
    pub sedentary: T,
    /// 1-3 days/week
    pub light: T,
    /// 3-5 days/week
    pub moderate: T,
    /// 6-7 days/week
    pub active: T,
}

impl<T: Copy> PerActivity<T> {
    /// Value for the given level
    #[must_use]
    pub const fn get(&self, level: ActivityLevel) -> T {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
        }
    }

    fn values(&self) -> [T; 4] {
        [self.sedentary, self.light, self.moderate, self.active]
    }
}

/// Nutrition engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Mifflin-St Jeor coefficients
    pub bmr: BmrConfig,
    /// Maintenance multipliers applied to BMR
    pub activity_factors: PerActivity<f64>,
    /// Protein target settings
    pub protein: ProteinConfig,
    /// Water target settings
    pub hydration: HydrationConfig,
    /// Calorie goal pacing
    pub pacing: PacingConfig,
    /// Periodic weight re-survey
    pub check_in: CheckInConfig,
    /// Streak walk bounds
    pub streak: StreakConfig,
    /// Daily logging settings
    pub tracking: TrackingConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl Default for PerActivity<f64> {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
        }
    }
}

/// Protein target configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinConfig {
    /// Grams of protein per kg of body weight
    pub grams_per_kg: PerActivity<f64>,
    /// Goal is rounded to a multiple of this many grams
    pub rounding_step_g: f64,
}

impl Default for ProteinConfig {
    fn default() -> Self {
        Self {
            grams_per_kg: PerActivity {
                sedentary: 0.8,
                light: 1.2,
                moderate: 1.4,
                active: 1.6,
            },
            rounding_step_g: 5.0,
        }
    }
}

/// Water target configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Base intake per kg of body weight (mL)
    pub ml_per_kg: f64,
    /// Extra intake for activity (mL)
    pub activity_bonus_ml: PerActivity<f64>,
    /// Goal is rounded to a multiple of this many mL
    pub rounding_step_ml: f64,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            ml_per_kg: 35.0,
            activity_bonus_ml: PerActivity {
                sedentary: 0.0,
                light: 300.0,
                moderate: 600.0,
                active: 900.0,
            },
            rounding_step_ml: 50.0,
        }
    }
}

/// Calorie goal pacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Energy per kg of body mass change (kcal)
    pub kcal_per_kg: f64,
    /// Fixed deficit when losing without a weekly rate (kcal)
    pub legacy_deficit_kcal: f64,
    /// Fixed surplus when gaining without a weekly rate (kcal)
    pub legacy_surplus_kcal: f64,
    /// Final goal is rounded to a multiple of this many kcal
    pub rounding_step_kcal: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            kcal_per_kg: energy::KCAL_PER_KG,
            legacy_deficit_kcal: 500.0,
            legacy_surplus_kcal: 300.0,
            rounding_step_kcal: 10.0,
        }
    }
}

/// Check-in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInConfig {
    /// Days between check-ins
    pub interval_days: i64,
    /// Horizon of the predicted-weight projection (days)
    pub projection_days: i64,
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            interval_days: tracking::CHECK_IN_INTERVAL_DAYS,
            projection_days: 30,
        }
    }
}

/// Streak configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Maximum days walked backward when counting a streak
    pub max_lookback_days: u32,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            max_lookback_days: 5 * 365,
        }
    }
}

/// Daily logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Water added per tap (mL)
    pub water_increment_ml: u32,
    /// Days shown in the history view
    pub history_window_days: u32,
    /// Upper bound on a requested history window
    pub max_history_days: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            water_increment_ml: tracking::WATER_INCREMENT_ML,
            history_window_days: tracking::HISTORY_WINDOW_DAYS,
            max_history_days: tracking::MAX_HISTORY_DAYS,
        }
    }
}

impl NutritionConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        NUTRITION_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load nutrition config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the result fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any coefficient is outside its usable range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bmr.msj_weight_coef <= 0.0 || self.bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }

        let factors = self.activity_factors.values();
        if factors.iter().any(|f| *f < 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "activity factors must be at least 1.0",
            ));
        }
        if factors.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::InvalidRange(
                "activity factors must not decrease with activity level",
            ));
        }

        if self.protein.grams_per_kg.values().iter().any(|g| *g <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "protein grams per kg must be positive",
            ));
        }
        if self.hydration.ml_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("ml_per_kg must be positive"));
        }
        if self
            .hydration
            .activity_bonus_ml
            .values()
            .iter()
            .any(|b| *b < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "hydration bonuses must not be negative",
            ));
        }

        if self.protein.rounding_step_g <= 0.0
            || self.hydration.rounding_step_ml <= 0.0
            || self.pacing.rounding_step_kcal <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange("rounding steps must be positive"));
        }
        if [
            self.protein.rounding_step_g,
            self.hydration.rounding_step_ml,
            self.pacing.rounding_step_kcal,
        ]
        .iter()
        .any(|step| step.fract() != 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "rounding steps must be whole numbers",
            ));
        }

        if self.pacing.kcal_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("kcal_per_kg must be positive"));
        }
        if self.pacing.legacy_deficit_kcal < 0.0 || self.pacing.legacy_surplus_kcal < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "legacy deficit and surplus must not be negative",
            ));
        }

        if self.check_in.interval_days <= 0 || self.check_in.projection_days <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "check-in interval and projection must be positive",
            ));
        }
        if self.streak.max_lookback_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "streak lookback must be positive",
            ));
        }
        if self.tracking.water_increment_ml == 0 || self.tracking.history_window_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "water increment and history window must be positive",
            ));
        }
        if self.tracking.history_window_days > self.tracking.max_history_days {
            return Err(ConfigError::InvalidRange(
                "history window must not exceed the maximum history length",
            ));
        }

        Ok(())
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("NOURISH_KCAL_PER_KG", &mut self.pacing.kcal_per_kg)?;
        Self::apply_env_var(
            "NOURISH_LEGACY_DEFICIT_KCAL",
            &mut self.pacing.legacy_deficit_kcal,
        )?;
        Self::apply_env_var(
            "NOURISH_LEGACY_SURPLUS_KCAL",
            &mut self.pacing.legacy_surplus_kcal,
        )?;
        Self::apply_env_var("NOURISH_WATER_ML_PER_KG", &mut self.hydration.ml_per_kg)?;
        Self::apply_env_var(
            "NOURISH_CHECK_IN_INTERVAL_DAYS",
            &mut self.check_in.interval_days,
        )?;
        Self::apply_env_var(
            "NOURISH_PROJECTION_DAYS",
            &mut self.check_in.projection_days,
        )?;
        Self::apply_env_var(
            "NOURISH_STREAK_LOOKBACK_DAYS",
            &mut self.streak.max_lookback_days,
        )?;
        Self::apply_env_var(
            "NOURISH_WATER_INCREMENT_ML",
            &mut self.tracking.water_increment_ml,
        )?;
        Self::apply_env_var(
            "NOURISH_HISTORY_WINDOW_DAYS",
            &mut self.tracking.history_window_days,
        )?;
        Self::apply_env_var(
            "NOURISH_MAX_HISTORY_DAYS",
            &mut self.tracking.max_history_days,
        )?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_are_valid() {
        NutritionConfig::default().validate().unwrap();
    }

    #[test]
    fn test_activity_lookup() {
        let config = NutritionConfig::default();
        assert!((config.activity_factors.get(ActivityLevel::Moderate) - 1.55).abs() < f64::EPSILON);
        assert!((config.protein.grams_per_kg.get(ActivityLevel::Active) - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_decreasing_activity_factors() {
        let mut config = NutritionConfig::default();
        config.activity_factors.moderate = 1.3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_rejects_zero_rounding_step() {
        let mut config = NutritionConfig::default();
        config.pacing.rounding_step_kcal = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_fractional_rounding_step() {
        let mut config = NutritionConfig::default();
        config.hydration.rounding_step_ml = 2.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_default_window_beyond_maximum() {
        let mut config = NutritionConfig::default();
        config.tracking.max_history_days = config.tracking.history_window_days - 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_override_applies() {
        env::set_var("NOURISH_CHECK_IN_INTERVAL_DAYS", "14");
        let config = NutritionConfig::load();
        env::remove_var("NOURISH_CHECK_IN_INTERVAL_DAYS");

        assert_eq!(config.unwrap().check_in.interval_days, 14);
    }

    #[test]
    #[serial]
    fn test_unparseable_override_is_parse_error() {
        env::set_var("NOURISH_KCAL_PER_KG", "lots");
        let config = NutritionConfig::load();
        env::remove_var("NOURISH_KCAL_PER_KG");

        assert!(matches!(config, Err(ConfigError::Parse(_))));
    }
}

// ABOUTME: Onboarding survey answers consumed by the goal calculator
// ABOUTME: Goal direction, gender, activity level enums and the SurveyData snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;

/// Direction the user wants their weight to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Caloric deficit
    #[default]
    Lose,
    /// Caloric balance
    Maintain,
    /// Caloric surplus
    Gain,
}

impl Goal {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        }
    }
}

/// Biological sex used by the Mifflin-St Jeor constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// +5 kcal constant
    #[default]
    Male,
    /// -161 kcal constant
    Female,
}

impl Gender {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
}

impl ActivityLevel {
    /// Every level, least to most active
    pub const ALL: [Self; 4] = [Self::Sedentary, Self::Light, Self::Moderate, Self::Active];

    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
        }
    }
}

macro_rules! impl_closed_enum_parsing {
    ($ty:ty, $field:literal, [$($text:literal => $variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    _ => Err(AppError::invalid_enum($field, s)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_closed_enum_parsing!(Goal, "goal", [
    "lose" => Goal::Lose,
    "maintain" => Goal::Maintain,
    "gain" => Goal::Gain,
]);

impl_closed_enum_parsing!(Gender, "gender", [
    "male" => Gender::Male,
    "female" => Gender::Female,
]);

impl_closed_enum_parsing!(ActivityLevel, "activity level", [
    "sedentary" => ActivityLevel::Sedentary,
    "light" => ActivityLevel::Light,
    "moderate" => ActivityLevel::Moderate,
    "active" => ActivityLevel::Active,
]);

/// Date of birth as entered in the survey
///
/// Parts stay `None` until the user fills them in. Stored documents may hold
/// an empty string for an unfilled part; that reads back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateOfBirth {
    /// Day of month (1-31)
    #[serde(default, deserialize_with = "blank_as_none")]
    pub day: Option<u32>,
    /// Month (1-12)
    #[serde(default, deserialize_with = "blank_as_none")]
    pub month: Option<u32>,
    /// Four-digit year
    #[serde(default, deserialize_with = "blank_as_none")]
    pub year: Option<i32>,
}

impl DateOfBirth {
    /// A fully populated date of birth
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            day: Some(day),
            month: Some(month),
            year: Some(year),
        }
    }

    /// True when day, month, and year are all populated
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.day.is_some() && self.month.is_some() && self.year.is_some()
    }

    /// The calendar date, if complete and valid
    #[must_use]
    pub fn to_date(&self) -> Option<NaiveDate> {
        match (self.year, self.month, self.day) {
            (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day),
            _ => None,
        }
    }
}

/// Number-or-blank helper for legacy survey documents
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrBlank<T> {
    Number(T),
    Text(String),
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    match Option::<NumberOrBlank<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrBlank::Number(value)) => Ok(Some(value)),
        Some(NumberOrBlank::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrBlank::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a number"))),
    }
}

/// Immutable snapshot of onboarding answers
///
/// New records carry `dob`; legacy records may carry only `age`.
/// `weekly_rate` is ignored when `goal` is [`Goal::Maintain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    /// Display name
    pub name: String,
    /// Weight direction
    pub goal: Goal,
    /// Biological sex
    pub gender: Gender,
    /// Date of birth (new records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateOfBirth>,
    /// Age in years (legacy records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Current weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Target weight in kilograms
    pub target_weight: f64,
    /// Target change in kilograms per week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_rate: Option<f64>,
}

impl SurveyData {
    /// Copy of this snapshot with a different current weight
    #[must_use]
    pub fn with_weight(&self, weight: f64) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parses_enums_case_insensitively() {
        assert_eq!("Moderate".parse::<ActivityLevel>().unwrap(), ActivityLevel::Moderate);
        assert_eq!(" gain ".parse::<Goal>().unwrap(), Goal::Gain);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
    }

    #[test]
    fn test_unknown_enum_value_is_invalid_enum() {
        let err = "extreme".parse::<ActivityLevel>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidEnum);

        let err = "other".parse::<Gender>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidEnum);
    }

    #[test]
    fn test_deserializes_stored_document() {
        let json = r#"{
            "name": "Sam",
            "goal": "lose",
            "gender": "female",
            "dob": {"day": 4, "month": "", "year": 1990},
            "weight": 70,
            "height": 175,
            "activityLevel": "light",
            "targetWeight": 65,
            "weeklyRate": 0.5
        }"#;
        let survey: SurveyData = serde_json::from_str(json).unwrap();

        assert_eq!(survey.activity_level, ActivityLevel::Light);
        let dob = survey.dob.unwrap();
        assert_eq!(dob.day, Some(4));
        assert_eq!(dob.month, None);
        assert!(!dob.is_complete());
        assert_eq!(survey.weekly_rate, Some(0.5));
        assert!(survey.age.is_none());
    }

    #[test]
    fn test_rejects_unknown_activity_level_in_document() {
        let json = r#"{"name":"x","goal":"lose","gender":"male","weight":70,
            "height":175,"activityLevel":"extreme","targetWeight":65}"#;
        assert!(serde_json::from_str::<SurveyData>(json).is_err());
    }

    #[test]
    fn test_invalid_calendar_date_has_no_date() {
        let dob = DateOfBirth::new(2023, 2, 30);
        assert!(dob.is_complete());
        assert!(dob.to_date().is_none());
    }
}

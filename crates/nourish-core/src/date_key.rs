// ABOUTME: Calendar day keys in YYYY-MM-DD form used to index daily documents
// ABOUTME: Wraps chrono NaiveDate with week-start and day-offset helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::formats;
use crate::errors::{AppError, ErrorCode};

/// A calendar day, serialized as `YYYY-MM-DD`
///
/// Ordering follows the calendar, so a `BTreeMap<DateKey, _>` iterates
/// oldest day first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap a date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month (1-12), and day
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the parts do not form a real calendar day
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, AppError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| AppError::invalid_input(format!("{year}-{month}-{day} is not a date")))
    }

    /// The wrapped date
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The day before this one
    #[must_use]
    pub fn pred(self) -> Self {
        self.minus_days(1)
    }

    /// Move back `days` days, saturating at the earliest representable date
    #[must_use]
    pub fn minus_days(self, days: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    /// Move forward `days` days, saturating at the latest representable date
    #[must_use]
    pub fn plus_days(self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }

    /// The Sunday on or before this day
    #[must_use]
    pub fn week_start(self) -> Self {
        let offset = self.0.weekday().num_days_from_sunday();
        self.minus_days(u64::from(offset))
    }

    /// Signed number of days from `earlier` to `self`
    #[must_use]
    pub fn days_since(self, earlier: Self) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(formats::DATE_KEY))
    }
}

impl FromStr for DateKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), formats::DATE_KEY)
            .map(Self)
            .map_err(|e| {
                AppError::new(
                    ErrorCode::InvalidFormat,
                    format!("'{s}' is not a YYYY-MM-DD date"),
                )
                .with_source(e)
            })
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_round_trips_through_display() {
        assert_eq!(key("2024-01-09").to_string(), "2024-01-09");
    }

    #[test]
    fn test_rejects_other_formats() {
        let err = "01/09/2024".parse::<DateKey>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_week_start_is_sunday_on_or_before() {
        // 2024-01-10 is a Wednesday
        assert_eq!(key("2024-01-10").week_start(), key("2024-01-07"));
        // a Sunday is its own week start
        assert_eq!(key("2024-01-07").week_start(), key("2024-01-07"));
        // Saturday belongs to the week that started six days earlier
        assert_eq!(key("2024-01-13").week_start(), key("2024-01-07"));
    }

    #[test]
    fn test_week_start_crosses_year_boundary() {
        // 2025-01-01 is a Wednesday
        assert_eq!(key("2025-01-01").week_start(), key("2024-12-29"));
    }

    #[test]
    fn test_days_since() {
        assert_eq!(key("2024-03-01").days_since(key("2024-02-01")), 29);
        assert_eq!(key("2024-02-01").days_since(key("2024-03-01")), -29);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&key("2024-05-06")).unwrap();
        assert_eq!(json, "\"2024-05-06\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-05-06"));
    }
}

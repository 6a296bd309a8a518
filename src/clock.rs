// ABOUTME: Source of "today" for date-keyed logs, streaks, and check-ins
// ABOUTME: SystemClock reads the UTC date; FixedClock pins a day for tests and replays
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicI32, Ordering};

use chrono::{Datelike, NaiveDate, Utc};
use nourish_core::DateKey;

/// Provides the current calendar day
pub trait Clock: Send + Sync {
    /// Today's date key
    fn today(&self) -> DateKey;
}

/// Wall clock using the UTC calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        DateKey::new(Utc::now().date_naive())
    }
}

/// Clock pinned to a day that can be moved explicitly
#[derive(Debug)]
pub struct FixedClock {
    days_from_ce: AtomicI32,
}

impl FixedClock {
    /// Pin the clock to `today`
    #[must_use]
    pub fn new(today: DateKey) -> Self {
        Self {
            days_from_ce: AtomicI32::new(today.date().num_days_from_ce()),
        }
    }

    /// Move the clock to another day
    pub fn set(&self, today: DateKey) {
        self.days_from_ce
            .store(today.date().num_days_from_ce(), Ordering::SeqCst);
    }

    /// Move the clock forward by `days`
    pub fn advance(&self, days: u64) {
        self.set(self.today().plus_days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DateKey {
        let days = self.days_from_ce.load(Ordering::SeqCst);
        // Only ever stores values produced by num_days_from_ce
        DateKey::new(NaiveDate::from_num_days_from_ce_opt(days).unwrap_or_default())
    }
}

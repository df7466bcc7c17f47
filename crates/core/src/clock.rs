// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable date handling

use chrono::{Days, Local, NaiveDate};
use std::sync::{Arc, Mutex};

/// A clock that provides the current calendar date
pub trait Clock: Clone + Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Real system clock, local time zone
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fake clock for testing with controllable dates
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<NaiveDate>>,
}

impl FakeClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            current: Arc::new(Mutex::new(date)),
        }
    }

    /// Advance the clock by the given number of days
    pub fn advance_days(&self, days: u64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = current.checked_add_days(Days::new(days)) {
            *current = next;
        }
    }

    /// Set the clock to a specific date
    pub fn set(&self, date: NaiveDate) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = date;
    }
}

impl Clock for FakeClock {
    fn today(&self) -> NaiveDate {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

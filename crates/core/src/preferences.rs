// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User preferences
//!
//! How dates are written and entered, and which heating season the ledger
//! currently covers.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::input::InputError;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static YEAR_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{4})$").expect("constant regex pattern is valid")
});

/// Order of day and month in written dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateFormat {
    /// Day first, `DD/MM/YYYY`
    Dmy,
    /// Month first, `MM/DD/YYYY`
    Mdy,
}

impl DateFormat {
    pub const CHOICES: &'static str = "DMY, MDY";

    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Dmy => "%d/%m/%Y",
            DateFormat::Mdy => "%m/%d/%Y",
        }
    }

    /// Human readable layout, e.g. `DD/MM/YYYY`
    pub fn label(self) -> &'static str {
        match self {
            DateFormat::Dmy => "DD/MM/YYYY",
            DateFormat::Mdy => "MM/DD/YYYY",
        }
    }

    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    pub fn parse_date(self, input: &str) -> Result<NaiveDate, InputError> {
        let trimmed = input.trim();
        NaiveDate::parse_from_str(trimmed, self.pattern()).map_err(|_| InputError::InvalidDate {
            input: trimmed.to_string(),
            expected: self.label(),
        })
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormat::Dmy => write!(f, "DMY ({})", self.label()),
            DateFormat::Mdy => write!(f, "MDY ({})", self.label()),
        }
    }
}

impl FromStr for DateFormat {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dmy" | "european" | "eu" => Ok(DateFormat::Dmy),
            "mdy" | "american" | "us" => Ok(DateFormat::Mdy),
            _ => Err(InputError::UnknownChoice {
                input: s.trim().to_string(),
                expected: Self::CHOICES,
            }),
        }
    }
}

/// Where the session date comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    /// The user types the date
    Manual,
    /// Today's date is used
    Automatic,
}

impl DateMode {
    pub const CHOICES: &'static str = "manual, automatic";
}

impl fmt::Display for DateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateMode::Manual => write!(f, "manual"),
            DateMode::Automatic => write!(f, "automatic"),
        }
    }
}

impl FromStr for DateMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" | "m" => Ok(DateMode::Manual),
            "automatic" | "auto" | "a" => Ok(DateMode::Automatic),
            _ => Err(InputError::UnknownChoice {
                input: s.trim().to_string(),
                expected: Self::CHOICES,
            }),
        }
    }
}

/// The heating season a ledger file covers, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, InputError> {
        if start > end {
            return Err(InputError::ReversedYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The season starting in `year` and ending the year after
    pub fn season_starting(year: i32) -> Self {
        Self {
            start: year,
            end: year + 1,
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date.year())
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for YearRange {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let captures = YEAR_RANGE_PATTERN
            .captures(trimmed)
            .ok_or_else(|| InputError::InvalidYearRange(trimmed.to_string()))?;
        let year = |i: usize| -> Result<i32, InputError> {
            captures[i]
                .parse()
                .map_err(|_| InputError::InvalidYearRange(trimmed.to_string()))
        };
        Self::new(year(1)?, year(2)?)
    }
}

/// Process-wide preferences, read and written as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub date_format: DateFormat,
    pub date_mode: DateMode,
    pub tracked_years: YearRange,
}

impl Preferences {
    /// Validate a date against the tracked years
    pub fn check_date(&self, date: NaiveDate) -> Result<NaiveDate, InputError> {
        if self.tracked_years.contains(date) {
            Ok(date)
        } else {
            Err(InputError::DateOutOfRange {
                date,
                range: self.tracked_years,
            })
        }
    }

    /// Parse a typed date in the configured format and check its year
    pub fn parse_session_date(&self, input: &str) -> Result<NaiveDate, InputError> {
        let date = self.date_format.parse_date(input)?;
        self.check_date(date)
    }
}

#[cfg(test)]
#[path = "preferences_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation of raw user input
//!
//! Every value typed at a prompt passes through one of these parsers. A
//! rejected value never reaches the registry or a session; the caller is
//! expected to ask again.

use chrono::NaiveDate;
use thiserror::Error;

use crate::preferences::YearRange;

/// Why a piece of user input was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is not a finite number")]
    NotFinite(String),
    #[error("{0} is negative, enter a value of 0 or more")]
    Negative(f64),
    #[error("{0} is too large, its actual value or the session total would overflow")]
    TooLarge(f64),
    #[error("coefficient must be greater than 0, got {0}")]
    NonPositive(f64),
    #[error("'{0}' is not a valid id, use a whole number of 0 or more")]
    InvalidId(String),
    #[error("id {0} is already used by another device")]
    IdInUse(u32),
    #[error("'{0}' is not a valid count, use a whole number of 1 or more")]
    InvalidCount(String),
    #[error("name must not be empty")]
    EmptyName,
    #[error("'{input}' is not a valid date, expected {expected}")]
    InvalidDate {
        input: String,
        expected: &'static str,
    },
    #[error("{date} falls outside the tracked years {range}")]
    DateOutOfRange { date: NaiveDate, range: YearRange },
    #[error("'{0}' is not a year range, expected YYYY-YYYY")]
    InvalidYearRange(String),
    #[error("start year {start} is after end year {end}")]
    ReversedYearRange { start: i32, end: i32 },
    #[error("'{input}' is not one of: {expected}")]
    UnknownChoice {
        input: String,
        expected: &'static str,
    },
}

/// Parse a non-negative real number (valve setting, raw reading)
pub fn parse_non_negative(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    check_non_negative(value).map_err(|err| match err {
        InputError::NotFinite(_) => InputError::NotFinite(trimmed.to_string()),
        other => other,
    })
}

/// Check a number is finite and not negative; negative zero becomes zero
pub fn check_non_negative(value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite(value.to_string()));
    }
    if value < 0.0 {
        return Err(InputError::Negative(value));
    }
    if value == 0.0 {
        return Ok(0.0);
    }
    Ok(value)
}

/// Parse a device coefficient (finite, strictly positive)
pub fn parse_coefficient(input: &str) -> Result<f64, InputError> {
    let value = parse_non_negative(input)?;
    if value == 0.0 {
        return Err(InputError::NonPositive(value));
    }
    Ok(value)
}

/// Parse a device id
pub fn parse_device_id(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| InputError::InvalidId(trimmed.to_string()))
}

/// Parse the number of devices to register during first-time setup
pub fn parse_device_count(input: &str) -> Result<usize, InputError> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(InputError::InvalidCount(trimmed.to_string())),
    }
}

/// Parse a display name (trimmed, non-empty)
pub fn parse_name(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading sessions
//!
//! A session is one dated pass over every registered device. The
//! [`SessionBuilder`] collects readings in registry order and refuses
//! malformed input without advancing; [`Session::derive`] turns the finished
//! session into the rows the ledger stores.

use chrono::NaiveDate;
use thiserror::Error;

use crate::clock::Clock;
use crate::device::{Device, DeviceId, Registry};
use crate::input::{self, InputError};
use crate::ledger::{total_of, DerivedRow, LedgerBlock};
use crate::preferences::Preferences;

/// Values entered for one device
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub device_id: DeviceId,
    pub valve_setting: f64,
    pub raw_value: f64,
}

/// A completed reading session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub date: NaiveDate,
    pub readings: Vec<Reading>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("session has {actual} readings but the registry has {expected} devices")]
    DeviceCountMismatch { expected: usize, actual: usize },
    #[error("reading for unknown device id {0}")]
    UnknownDevice(DeviceId),
    #[error("reading {position} is for device {found}, expected device {expected}")]
    OrderMismatch {
        position: usize,
        expected: DeviceId,
        found: DeviceId,
    },
    #[error("every device already has a reading")]
    NoDeviceLeft,
    #[error("{remaining} device(s) still need a reading")]
    Incomplete { remaining: usize },
    #[error("no session date was set")]
    MissingDate,
}

impl Session {
    /// Rows for the ledger, one per device in registry order plus the totals row
    ///
    /// Coefficients are copied from `registry` into the rows, so later registry
    /// edits never change what was recorded.
    pub fn derive(&self, registry: &Registry) -> Result<LedgerBlock, SessionError> {
        if self.readings.len() != registry.len() {
            return Err(SessionError::DeviceCountMismatch {
                expected: registry.len(),
                actual: self.readings.len(),
            });
        }

        let mut rows = Vec::with_capacity(self.readings.len());
        for (position, (device, reading)) in registry.iter().zip(&self.readings).enumerate() {
            if device.id != reading.device_id {
                if registry.get(reading.device_id).is_none() {
                    return Err(SessionError::UnknownDevice(reading.device_id));
                }
                return Err(SessionError::OrderMismatch {
                    position,
                    expected: device.id,
                    found: reading.device_id,
                });
            }
            rows.push(DerivedRow {
                date: self.date,
                device_name: device.name.clone(),
                device_id: device.id,
                coefficient: device.coefficient,
                raw_value: reading.raw_value,
                actual_value: reading.raw_value * device.coefficient,
                valve_setting: reading.valve_setting,
                note: self.note.clone(),
            });
        }

        Ok(LedgerBlock::new(self.date, rows))
    }
}

/// Collects one reading per device, in registry order
#[derive(Debug)]
pub struct SessionBuilder<'a> {
    registry: &'a Registry,
    preferences: &'a Preferences,
    date: Option<NaiveDate>,
    readings: Vec<Reading>,
    note: Option<String>,
}

impl<'a> SessionBuilder<'a> {
    pub fn new(registry: &'a Registry, preferences: &'a Preferences) -> Self {
        Self {
            registry,
            preferences,
            date: None,
            readings: Vec::with_capacity(registry.len()),
            note: None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Set the session date; it must fall within the tracked years
    pub fn set_date(&mut self, date: NaiveDate) -> Result<NaiveDate, InputError> {
        let date = self.preferences.check_date(date)?;
        self.date = Some(date);
        Ok(date)
    }

    /// Parse a typed date in the configured format
    pub fn enter_date(&mut self, input: &str) -> Result<NaiveDate, InputError> {
        let date = self.preferences.parse_session_date(input)?;
        self.date = Some(date);
        Ok(date)
    }

    /// Use today's date from `clock`
    pub fn use_today(&mut self, clock: &impl Clock) -> Result<NaiveDate, InputError> {
        self.set_date(clock.today())
    }

    /// The device the next reading belongs to
    pub fn current_device(&self) -> Option<&'a Device> {
        self.registry.devices().get(self.readings.len())
    }

    pub fn remaining(&self) -> usize {
        self.registry.len() - self.readings.len()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Record numeric values for the current device
    pub fn record(&mut self, valve_setting: f64, raw_value: f64) -> Result<Reading, SessionError> {
        let device = self.current_device().ok_or(SessionError::NoDeviceLeft)?;
        let reading = Reading {
            device_id: device.id,
            valve_setting: input::check_non_negative(valve_setting)?,
            raw_value: self.check_raw_value(raw_value)?,
        };
        tracing::debug!(device_id = device.id, valve_setting, raw_value, "reading recorded");
        self.readings.push(reading.clone());
        Ok(reading)
    }

    /// Check a raw reading for the current device
    ///
    /// Besides being finite and non-negative, the actual value and the running
    /// session total must stay finite.
    pub fn check_raw_value(&self, raw_value: f64) -> Result<f64, InputError> {
        let raw_value = input::check_non_negative(raw_value)?;
        let Some(device) = self.current_device() else {
            return Ok(raw_value);
        };
        let actual = raw_value * device.coefficient;
        let recorded = self
            .readings
            .iter()
            .zip(self.registry.iter())
            .map(|(r, d)| r.raw_value * d.coefficient);
        if !actual.is_finite() || !total_of(recorded.chain(std::iter::once(actual))).is_finite() {
            return Err(InputError::TooLarge(raw_value));
        }
        Ok(raw_value)
    }

    /// Parse and record typed values; on error nothing is recorded
    pub fn submit(&mut self, valve_input: &str, raw_input: &str) -> Result<Reading, SessionError> {
        let valve_setting = input::parse_non_negative(valve_input)?;
        let raw_value = input::parse_non_negative(raw_input)?;
        self.record(valve_setting, raw_value)
    }

    /// Drop all readings so they can be entered again
    pub fn restart_readings(&mut self) {
        self.readings.clear();
    }

    /// Attach a free-text note; blank text clears it
    pub fn set_note(&mut self, note: Option<&str>) {
        self.note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
    }

    pub fn finish(self) -> Result<Session, SessionError> {
        let remaining = self.remaining();
        if remaining > 0 {
            return Err(SessionError::Incomplete { remaining });
        }
        let date = self.date.ok_or(SessionError::MissingDate)?;
        Ok(Session {
            date,
            readings: self.readings,
            note: self.note,
        })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

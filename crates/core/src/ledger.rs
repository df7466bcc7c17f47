// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ledger rows and the storage seam they are written through
//!
//! A ledger is an append-only table, one per tracked-year range. Each session
//! contributes a [`LedgerBlock`]: one [`DerivedRow`] per device followed by a
//! single [`TotalsRow`]. Blocks are committed whole or not at all.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::device::DeviceId;
use crate::preferences::{DateFormat, YearRange};

/// Column headers, in file order
pub const LEDGER_HEADERS: [&str; 9] = [
    "Date",
    "Radiator Name",
    "Radiator ID",
    "Coefficient",
    "Raw Reading",
    "Actual Value",
    "Total",
    "Valve Setting",
    "Notes",
];

/// One device's line in a session block
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub date: NaiveDate,
    pub device_name: String,
    pub device_id: DeviceId,
    /// Coefficient at entry time, not a live reference to the registry
    pub coefficient: f64,
    pub raw_value: f64,
    pub actual_value: f64,
    pub valve_setting: f64,
    pub note: Option<String>,
}

impl DerivedRow {
    pub fn to_record(&self, format: DateFormat) -> LedgerRecord {
        LedgerRecord {
            date: format.format(self.date),
            device_name: self.device_name.clone(),
            device_id: Some(self.device_id),
            coefficient: Some(self.coefficient),
            raw_reading: Some(self.raw_value),
            actual_value: Some(self.actual_value),
            total: None,
            valve_setting: Some(self.valve_setting),
            notes: self.note.clone().unwrap_or_default(),
        }
    }
}

/// Closing line of a session block, only date and total are populated
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub date: NaiveDate,
    pub total: f64,
}

impl TotalsRow {
    pub fn to_record(&self, format: DateFormat) -> LedgerRecord {
        LedgerRecord {
            date: format.format(self.date),
            total: Some(self.total),
            ..LedgerRecord::default()
        }
    }
}

/// Sum of actual values, independent of the order they are given in
pub fn total_of(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// All rows a session appends, committed as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerBlock {
    rows: Vec<DerivedRow>,
    totals: TotalsRow,
}

impl LedgerBlock {
    pub fn new(date: NaiveDate, rows: Vec<DerivedRow>) -> Self {
        let total = total_of(rows.iter().map(|r| r.actual_value));
        Self {
            rows,
            totals: TotalsRow { date, total },
        }
    }

    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    pub fn totals(&self) -> &TotalsRow {
        &self.totals
    }

    /// Number of ledger lines this block occupies
    pub fn line_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Device records in session order, then the totals record
    pub fn records(&self, format: DateFormat) -> Vec<LedgerRecord> {
        self.rows
            .iter()
            .map(|r| r.to_record(format))
            .chain(std::iter::once(self.totals.to_record(format)))
            .collect()
    }
}

/// A ledger line as stored, every cell optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Radiator Name")]
    pub device_name: String,
    #[serde(rename = "Radiator ID")]
    pub device_id: Option<DeviceId>,
    #[serde(rename = "Coefficient")]
    pub coefficient: Option<f64>,
    #[serde(rename = "Raw Reading")]
    pub raw_reading: Option<f64>,
    #[serde(rename = "Actual Value")]
    pub actual_value: Option<f64>,
    #[serde(rename = "Total")]
    pub total: Option<f64>,
    #[serde(rename = "Valve Setting")]
    pub valve_setting: Option<f64>,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl LedgerRecord {
    pub fn is_totals(&self) -> bool {
        self.device_id.is_none() && self.total.is_some()
    }

    /// Cells in header order; absent values are empty, numbers in shortest form
    pub fn fields(&self) -> [String; 9] {
        fn cell<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        [
            self.date.clone(),
            self.device_name.clone(),
            cell(self.device_id),
            cell(self.coefficient),
            cell(self.raw_reading),
            cell(self.actual_value),
            cell(self.total),
            cell(self.valve_setting),
            self.notes.clone(),
        ]
    }
}

/// Valve settings recorded in the most recent block, keyed by device
pub fn previous_valve_settings(records: &[LedgerRecord]) -> HashMap<DeviceId, f64> {
    records
        .iter()
        .rev()
        .skip_while(|r| r.is_totals())
        .take_while(|r| !r.is_totals())
        .filter_map(|r| Some((r.device_id?, r.valve_setting?)))
        .collect()
}

/// An opened ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerHandle {
    pub range: YearRange,
    pub location: PathBuf,
    /// True when this open created the ledger
    pub created: bool,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("cannot access ledger {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ledger {} is malformed: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl LedgerError {
    pub fn path(&self) -> &Path {
        match self {
            LedgerError::Io { path, .. } | LedgerError::Corrupt { path, .. } => path,
        }
    }
}

/// Append-only storage for session blocks
pub trait LedgerStore {
    /// Open the ledger for a year range, creating it with a header row if absent
    fn open_or_create(&self, range: YearRange) -> Result<LedgerHandle, LedgerError>;

    /// Commit a whole block after the existing rows, or leave the ledger unchanged
    fn append(&self, handle: &LedgerHandle, block: &LedgerBlock) -> Result<(), LedgerError>;

    /// All rows below the header, oldest first
    fn records(&self, handle: &LedgerHandle) -> Result<Vec<LedgerRecord>, LedgerError>;

    fn previous_valve_settings(
        &self,
        handle: &LedgerHandle,
    ) -> Result<HashMap<DeviceId, f64>, LedgerError> {
        Ok(previous_valve_settings(&self.records(handle)?))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLedgerStore;

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;

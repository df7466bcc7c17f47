// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory ledger store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LedgerBlock, LedgerError, LedgerHandle, LedgerRecord, LedgerStore};
use crate::preferences::{DateFormat, YearRange};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    ledgers: HashMap<YearRange, Vec<LedgerRecord>>,
    fail_appends: bool,
}

/// Fake ledger store keeping records in memory
#[derive(Clone)]
pub struct FakeLedgerStore {
    format: DateFormat,
    state: Arc<Mutex<FakeState>>,
}

impl FakeLedgerStore {
    pub fn new(format: DateFormat) -> Self {
        Self {
            format,
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    /// A view of the same ledgers that writes dates in `format`
    pub fn with_format(&self, format: DateFormat) -> Self {
        Self {
            format,
            state: Arc::clone(&self.state),
        }
    }

    /// Make every following append fail with an I/O error
    pub fn fail_appends(&self, fail: bool) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).fail_appends = fail;
    }

    /// Snapshot of the records stored for a range
    pub fn ledger(&self, range: YearRange) -> Option<Vec<LedgerRecord>> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .ledgers
            .get(&range)
            .cloned()
    }

    /// Year ranges that have a ledger
    pub fn ranges(&self) -> Vec<YearRange> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut ranges: Vec<_> = state.ledgers.keys().copied().collect();
        ranges.sort_by_key(|r| (r.start(), r.end()));
        ranges
    }

    fn location(range: YearRange) -> PathBuf {
        PathBuf::from(format!("memory://radiators_usage_{}", range))
    }
}

impl LedgerStore for FakeLedgerStore {
    fn open_or_create(&self, range: YearRange) -> Result<LedgerHandle, LedgerError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let created = !state.ledgers.contains_key(&range);
        state.ledgers.entry(range).or_default();
        Ok(LedgerHandle {
            range,
            location: Self::location(range),
            created,
        })
    }

    fn append(&self, handle: &LedgerHandle, block: &LedgerBlock) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.fail_appends {
            return Err(LedgerError::Io {
                path: handle.location.clone(),
                source: std::io::Error::other("injected append failure"),
            });
        }
        let records = block.records(self.format);
        let ledger = state
            .ledgers
            .get_mut(&handle.range)
            .ok_or_else(|| LedgerError::Corrupt {
                path: handle.location.clone(),
                reason: "ledger was never opened".to_string(),
            })?;
        ledger.extend(records);
        Ok(())
    }

    fn records(&self, handle: &LedgerHandle) -> Result<Vec<LedgerRecord>, LedgerError> {
        Ok(self.ledger(handle.range).unwrap_or_default())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter bundle the workflow runs against

use std::path::PathBuf;
use thermo_adapters::{FileOpener, SystemOpener, TracedOpener};
use thermo_core::{Clock, DateFormat, LedgerStore, SystemClock};
use thermo_storage::{CsvLedgerStore, TracedLedgerStore};

/// External effects of a run: the ledger, today's date, the desktop
pub trait Adapters {
    type Ledger: LedgerStore;
    type Clock: Clock;
    type Opener: FileOpener;

    /// Ledger store writing dates in `format`
    fn ledger(&self, format: DateFormat) -> Self::Ledger;
    fn clock(&self) -> Self::Clock;
    fn opener(&self) -> Self::Opener;
}

/// Production adapters: CSV ledgers on disk, system clock, platform opener
#[derive(Clone)]
pub struct RealAdapters {
    ledger_dir: PathBuf,
}

impl RealAdapters {
    pub fn new(ledger_dir: impl Into<PathBuf>) -> Self {
        Self {
            ledger_dir: ledger_dir.into(),
        }
    }
}

impl Adapters for RealAdapters {
    type Ledger = TracedLedgerStore<CsvLedgerStore>;
    type Clock = SystemClock;
    type Opener = TracedOpener<SystemOpener>;

    fn ledger(&self, format: DateFormat) -> Self::Ledger {
        TracedLedgerStore::new(CsvLedgerStore::new(self.ledger_dir.clone(), format))
    }

    fn clock(&self) -> Self::Clock {
        SystemClock
    }

    fn opener(&self) -> Self::Opener {
        TracedOpener::new(SystemOpener::new())
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced ledger wrapper for consistent observability

use thermo_core::{
    LedgerBlock, LedgerError, LedgerHandle, LedgerRecord, LedgerStore, YearRange,
};

/// Wrapper that adds tracing to any LedgerStore
#[derive(Clone)]
pub struct TracedLedgerStore<L> {
    inner: L,
}

impl<L> TracedLedgerStore<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: LedgerStore> LedgerStore for TracedLedgerStore<L> {
    fn open_or_create(&self, range: YearRange) -> Result<LedgerHandle, LedgerError> {
        let span = tracing::info_span!("ledger.open", %range);
        let _guard = span.enter();

        let result = self.inner.open_or_create(range);
        match &result {
            Ok(handle) => tracing::info!(
                path = %handle.location.display(),
                created = handle.created,
                "ledger ready"
            ),
            Err(e) => tracing::error!(error = %e, "open failed"),
        }
        result
    }

    fn append(&self, handle: &LedgerHandle, block: &LedgerBlock) -> Result<(), LedgerError> {
        let span = tracing::info_span!("ledger.append", path = %handle.location.display());
        let _guard = span.enter();

        tracing::info!(
            devices = block.rows().len(),
            date = %block.totals().date,
            "appending block"
        );

        let start = std::time::Instant::now();
        let result = self.inner.append(handle, block);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(
                lines = block.line_count(),
                total = block.totals().total,
                elapsed_ms = elapsed.as_millis() as u64,
                "block committed"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "append failed, ledger unchanged"
            ),
        }
        result
    }

    fn records(&self, handle: &LedgerHandle) -> Result<Vec<LedgerRecord>, LedgerError> {
        let span = tracing::debug_span!("ledger.records", path = %handle.location.display());
        let _guard = span.enter();

        let result = self.inner.records(handle);
        match &result {
            Ok(records) => tracing::debug!(count = records.len(), "records read"),
            Err(e) => tracing::warn!(error = %e, "read failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

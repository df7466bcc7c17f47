// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::opener::{FileOpener, OpenError};
use std::path::Path;

/// Wrapper that adds tracing to any FileOpener
#[derive(Clone)]
pub struct TracedOpener<O> {
    inner: O,
}

impl<O> TracedOpener<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }
}

impl<O: FileOpener> FileOpener for TracedOpener<O> {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        let span = tracing::info_span!("opener.open", path = %path.display());
        let _guard = span.enter();

        // Precondition: the file must exist
        if !path.exists() {
            tracing::error!("file does not exist");
            return Err(OpenError::NotFound(path.to_path_buf()));
        }

        let start = std::time::Instant::now();
        let result = self.inner.open(path);
        let elapsed = start.elapsed();

        // A failed open is not fatal, the file is already written
        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "opened"),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "open failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

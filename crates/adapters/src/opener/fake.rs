// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake opener for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FileOpener, OpenError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded open request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenCall {
    pub path: PathBuf,
}

#[derive(Default)]
struct FakeOpenerState {
    calls: Vec<OpenCall>,
    fail: bool,
}

/// Fake opener for testing
#[derive(Clone, Default)]
pub struct FakeOpener {
    state: Arc<Mutex<FakeOpenerState>>,
}

impl FakeOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following open fail as if no launcher were installed
    pub fn set_fail(&self, fail: bool) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).fail = fail;
    }

    /// Get all recorded open requests
    pub fn calls(&self) -> Vec<OpenCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

impl FileOpener for FakeOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(OpenCall {
            path: path.to_path_buf(),
        });
        if state.fail {
            return Err(OpenError::Launch {
                program: "fake-open",
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no launcher"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

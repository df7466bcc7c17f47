// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opening files in the platform's default application

mod system;

pub use system::SystemOpener;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOpener, OpenCall};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from opening a file
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not run {program}: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: &'static str,
        status: String,
    },
}

/// Adapter for handing a file to the desktop
pub trait FileOpener: Clone + Send + Sync + 'static {
    /// Open `path` with whatever application the platform associates with it
    fn open(&self, path: &Path) -> Result<(), OpenError>;
}

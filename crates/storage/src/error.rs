// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};
use thermo_core::RegistryError;
use thiserror::Error;

/// Errors raised while loading or saving the registry and preferences
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("cannot read {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} not found at {}", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },
    #[error("registry {} is invalid: {source}", .path.display())]
    InvalidRegistry {
        path: PathBuf,
        #[source]
        source: RegistryError,
    },
    #[error("{} is malformed: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            StorageError::Io { path, .. }
            | StorageError::Csv { path, .. }
            | StorageError::Json { path, .. }
            | StorageError::NotFound { path, .. }
            | StorageError::InvalidRegistry { path, .. }
            | StorageError::Corrupt { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

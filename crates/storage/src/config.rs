// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-backed user preferences

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thermo_core::{DateFormat, DateMode, Preferences, YearRange};

use crate::atomic::write_atomic;
use crate::error::StorageError;

/// On-disk shape of the preferences file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesDocument {
    pub date_format: DateFormat,
    pub date_mode: DateMode,
    pub tracked_year_start: i32,
    pub tracked_year_end: i32,
}

impl From<&Preferences> for PreferencesDocument {
    fn from(prefs: &Preferences) -> Self {
        Self {
            date_format: prefs.date_format,
            date_mode: prefs.date_mode,
            tracked_year_start: prefs.tracked_years.start(),
            tracked_year_end: prefs.tracked_years.end(),
        }
    }
}

/// Reads and rewrites the preferences file as a whole
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Preferences, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    kind: "preferences",
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        let doc: PreferencesDocument =
            serde_json::from_str(&json).map_err(|source| StorageError::Json {
                path: self.path.clone(),
                source,
            })?;
        let tracked_years = YearRange::new(doc.tracked_year_start, doc.tracked_year_end)
            .map_err(|e| StorageError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Preferences {
            date_format: doc.date_format,
            date_mode: doc.date_mode,
            tracked_years,
        })
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), StorageError> {
        let mut json = serde_json::to_string_pretty(&PreferencesDocument::from(prefs)).map_err(
            |source| StorageError::Json {
                path: self.path.clone(),
                source,
            },
        )?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes()).map_err(|e| StorageError::io(&self.path, e))?;
        tracing::info!(
            path = %self.path.display(),
            years = %prefs.tracked_years,
            format = ?prefs.date_format,
            mode = %prefs.date_mode,
            "preferences saved"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where Thermo Tracker keeps its files

use std::path::{Path, PathBuf};

use crate::error::ThermoError;

/// Directory name under the platform data dir
const APP_DIR: &str = "thermo-tracker";

/// File locations inside the home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub home: PathBuf,
    /// Preferences document
    pub config: PathBuf,
    /// Device registry
    pub registry: PathBuf,
    /// Folder holding one ledger per year range
    pub ledger_dir: PathBuf,
    pub log: PathBuf,
}

impl Paths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            config: home.join("config.json"),
            registry: home.join("radiators_registry.csv"),
            ledger_dir: home.join("radiators_usage"),
            log: home.join("thermo-tracker.log"),
            home,
        }
    }

    /// Resolve the home directory: explicit flag, then `THERMO_HOME`, then
    /// the platform data directory
    pub fn resolve(home: Option<&Path>) -> Result<Self, ThermoError> {
        if let Some(home) = home {
            return Ok(Self::new(home));
        }
        if let Some(home) = std::env::var_os("THERMO_HOME").filter(|h| !h.is_empty()) {
            return Ok(Self::new(PathBuf::from(home)));
        }
        dirs::data_dir()
            .map(|dir| Self::new(dir.join(APP_DIR)))
            .ok_or_else(ThermoError::home_unavailable)
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;

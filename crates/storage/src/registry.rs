// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CSV-backed device registry

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thermo_core::{Device, Registry, Upsert};

use crate::atomic::write_atomic;
use crate::error::StorageError;

/// Registry file columns, in order
pub const REGISTRY_HEADERS: [&str; 3] = ["id", "name", "coefficient"];

/// Reads and rewrites the registry file as a whole
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the registry, rejecting duplicate ids and invalid devices
    pub fn load(&self) -> Result<Registry, StorageError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    kind: "registry",
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let headers = reader.headers().map_err(|e| self.csv_error(e))?;
        if headers.iter().ne(REGISTRY_HEADERS.iter().copied()) {
            return Err(StorageError::Corrupt {
                path: self.path.clone(),
                reason: format!(
                    "expected columns {}, found {}",
                    REGISTRY_HEADERS.join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            });
        }

        let mut devices = Vec::new();
        for row in reader.deserialize::<Device>() {
            devices.push(row.map_err(|e| self.csv_error(e))?);
        }
        let registry =
            Registry::from_devices(devices).map_err(|source| StorageError::InvalidRegistry {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), devices = registry.len(), "registry loaded");
        Ok(registry)
    }

    /// Replace the stored registry, keeping device order
    pub fn save(&self, registry: &Registry) -> Result<(), StorageError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(REGISTRY_HEADERS)
            .map_err(|e| self.csv_error(e))?;
        for device in registry.iter() {
            writer
                .write_record([
                    device.id.to_string(),
                    device.name.clone(),
                    device.coefficient.to_string(),
                ])
                .map_err(|e| self.csv_error(e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| StorageError::io(&self.path, e.into_error()))?;

        write_atomic(&self.path, &bytes).map_err(|e| StorageError::io(&self.path, e))?;
        tracing::info!(path = %self.path.display(), devices = registry.len(), "registry saved");
        Ok(())
    }

    /// Add or update one device and persist the result
    ///
    /// A missing registry file counts as an empty registry.
    pub fn upsert(&self, device: Device) -> Result<(Registry, Upsert), StorageError> {
        let mut registry = match self.load() {
            Ok(registry) => registry,
            Err(e) if e.is_not_found() => Registry::new(),
            Err(e) => return Err(e),
        };
        let id = device.id;
        let outcome = registry.upsert(device);
        self.save(&registry)?;
        tracing::info!(id, ?outcome, "device stored");
        Ok((registry, outcome))
    }

    fn csv_error(&self, source: csv::Error) -> StorageError {
        StorageError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracked devices and the registry that orders them
//!
//! A device is one heat cost allocator mounted on a radiator. The registry
//! keeps devices in insertion order; that order is the order readings are
//! requested in and the order rows appear in the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::input::{self, InputError};

/// Stable identifier of a device
pub type DeviceId = u32;

/// A heat cost allocator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub coefficient: f64,
}

impl Device {
    /// Build a device, validating name and coefficient
    pub fn new(id: DeviceId, name: &str, coefficient: f64) -> Result<Self, InputError> {
        let name = input::parse_name(name)?;
        if !coefficient.is_finite() {
            return Err(InputError::NotFinite(coefficient.to_string()));
        }
        if coefficient <= 0.0 {
            return Err(InputError::NonPositive(coefficient));
        }
        Ok(Self {
            id,
            name,
            coefficient,
        })
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (id {}, coefficient {})",
            self.name, self.id, self.coefficient
        )
    }
}

/// Corrupted registry contents
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("device id {0} appears more than once")]
    DuplicateId(DeviceId),
    #[error("device {id}: {source}")]
    InvalidDevice {
        id: DeviceId,
        #[source]
        source: InputError,
    },
}

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Updated,
}

/// Ordered set of devices with unique ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    devices: Vec<Device>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from stored devices, rejecting corrupted content
    pub fn from_devices(devices: Vec<Device>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for device in devices {
            if registry.get(device.id).is_some() {
                return Err(RegistryError::DuplicateId(device.id));
            }
            let checked = Device::new(device.id, &device.name, device.coefficient).map_err(
                |source| RegistryError::InvalidDevice {
                    id: device.id,
                    source,
                },
            )?;
            registry.devices.push(checked);
        }
        Ok(registry)
    }

    /// Add a device, or replace name and coefficient of an existing id in place
    pub fn upsert(&mut self, device: Device) -> Upsert {
        match self.devices.iter_mut().find(|d| d.id == device.id) {
            Some(existing) => {
                existing.name = device.name;
                existing.coefficient = device.coefficient;
                Upsert::Updated
            }
            None => {
                self.devices.push(device);
                Upsert::Added
            }
        }
    }

    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Smallest id not yet taken, suggested when adding a device
    pub fn next_free_id(&self) -> DeviceId {
        let mut id = 0;
        while self.get(id).is_some() {
            id += 1;
        }
        id
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;

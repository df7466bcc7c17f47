// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! thermo-storage: file persistence for Thermo Tracker
//!
//! - `RegistryStore` keeps the device registry in a CSV file
//! - `ConfigStore` keeps user preferences in a JSON document
//! - `CsvLedgerStore` appends session blocks to one CSV ledger per year range
//!
//! Every write goes through a temporary file in the target directory that is
//! renamed over the destination, so a failed write never leaves a partial file.

mod atomic;
mod config;
mod error;
mod ledger;
mod registry;
mod traced;

pub use atomic::write_atomic;
pub use config::{ConfigStore, PreferencesDocument};
pub use error::StorageError;
pub use ledger::{ledger_file_name, CsvLedgerStore};
pub use registry::{RegistryStore, REGISTRY_HEADERS};
pub use traced::TracedLedgerStore;

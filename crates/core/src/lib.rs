// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! thermo-core: Core library for the Thermo Tracker CLI
//!
//! This crate provides:
//! - The device registry and user preferences
//! - Input validation for everything typed at a prompt
//! - The session builder that turns readings into ledger rows
//! - The append-only ledger seam (`LedgerStore`)

pub mod clock;
pub mod input;

pub mod device;
pub mod ledger;
pub mod preferences;
pub mod session;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use device::{Device, DeviceId, Registry, RegistryError, Upsert};
pub use input::InputError;
pub use ledger::{
    DerivedRow, LedgerBlock, LedgerError, LedgerHandle, LedgerRecord, LedgerStore, TotalsRow,
    LEDGER_HEADERS,
};
pub use preferences::{DateFormat, DateMode, Preferences, YearRange};
pub use session::{Reading, Session, SessionBuilder, SessionError};

#[cfg(any(test, feature = "test-support"))]
pub use ledger::FakeLedgerStore;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Every failure that ends a run is turned into a [`ThermoError`] that says
//! what went wrong, what state the files were left in, and how to recover.

use std::fmt;
use thermo_core::{LedgerError, SessionError};
use thermo_storage::StorageError;

use crate::prompt::PromptError;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct ThermoError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ThermoError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ThermoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ThermoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl ThermoError {
    /// No home directory could be determined.
    pub fn home_unavailable() -> Self {
        ThermoError::new("Cannot determine where to keep Thermo Tracker data")
            .with_context("The platform data directory is not available")
            .with_suggestion("Pass a directory explicitly: thermo --home <DIR>")
            .with_suggestion("Or set THERMO_HOME to a writable directory")
    }

    /// Stdin was closed before the session could be saved.
    pub fn input_closed() -> Self {
        ThermoError::new("Input closed before the session was saved")
            .with_context("No rows were written to the ledger")
            .with_suggestion("Run thermo again and answer every prompt")
    }

    /// Writing to or reading from the terminal failed.
    pub fn terminal(source: std::io::Error) -> Self {
        ThermoError::new(format!("Terminal I/O failed: {}", source))
            .with_context("No rows were written to the ledger")
            .with_source(source)
    }

    /// A registry or preferences file could not be loaded or saved.
    pub fn storage(err: StorageError) -> Self {
        let path = err.path().display().to_string();
        let base = match &err {
            StorageError::Io { .. } => ThermoError::new(format!("Cannot access {}", path))
                .with_context(err.to_string())
                .with_suggestion("Check that the directory exists and is writable")
                .with_suggestion("Choose another location: thermo --home <DIR>"),
            StorageError::NotFound { kind, .. } => {
                ThermoError::new(format!("No {} found at {}", kind, path))
                    .with_suggestion("Run thermo again to go through first-time setup")
            }
            StorageError::Csv { .. }
            | StorageError::Json { .. }
            | StorageError::InvalidRegistry { .. }
            | StorageError::Corrupt { .. } => {
                ThermoError::new(format!("{} is corrupted", path))
                    .with_context(err.to_string())
                    .with_context("The file was left as it is")
                    .with_suggestion(format!("Fix the file by hand: {}", path))
                    .with_suggestion("Or move it aside to run first-time setup again")
            }
        };
        base.with_source(err)
    }

    /// The ledger could not be opened or appended to.
    pub fn ledger(err: LedgerError) -> Self {
        let path = err.path().display().to_string();
        let base = match &err {
            LedgerError::Io { .. } => ThermoError::new(format!("Cannot write ledger {}", path))
                .with_context(err.to_string())
                .with_context("The ledger was left unchanged; this session was not saved")
                .with_suggestion("Close the file if another program holds it open")
                .with_suggestion("Check free disk space and permissions, then run thermo again"),
            LedgerError::Corrupt { .. } => {
                ThermoError::new(format!("Ledger {} is not a Thermo Tracker ledger", path))
                    .with_context(err.to_string())
                    .with_suggestion("Restore the header row of the file")
                    .with_suggestion(
                        "Or move the file aside; a new ledger will be created on the next run",
                    )
            }
        };
        base.with_source(err)
    }

    /// A finished session did not match the registry it was built from.
    pub fn session(err: SessionError) -> Self {
        ThermoError::new(format!("Session could not be recorded: {}", err))
            .with_context("No rows were written to the ledger")
            .with_source(err)
    }
}

impl From<PromptError> for ThermoError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Closed => ThermoError::input_closed(),
            PromptError::Io(source) => ThermoError::terminal(source),
        }
    }
}

impl From<StorageError> for ThermoError {
    fn from(err: StorageError) -> Self {
        ThermoError::storage(err)
    }
}

impl From<LedgerError> for ThermoError {
    fn from(err: LedgerError) -> Self {
        ThermoError::ledger(err)
    }
}

impl From<SessionError> for ThermoError {
    fn from(err: SessionError) -> Self {
        ThermoError::session(err)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

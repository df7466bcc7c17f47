// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CSV ledger files, one per tracked-year range
//!
//! A ledger starts with the header row and only ever grows. An append reads
//! the current file, adds the block, and swaps the result in with
//! [`write_atomic`]: either every line of the block lands or none does.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thermo_core::{
    DateFormat, LedgerBlock, LedgerError, LedgerHandle, LedgerRecord, LedgerStore, YearRange,
    LEDGER_HEADERS,
};

use crate::atomic::write_atomic;

/// File name of the ledger covering `range`
pub fn ledger_file_name(range: YearRange) -> String {
    format!("radiators_usage_{}.csv", range)
}

/// Ledger files kept in one directory
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    dir: PathBuf,
    format: DateFormat,
}

impl CsvLedgerStore {
    /// `format` is the date layout written into new rows
    pub fn new(dir: impl Into<PathBuf>, format: DateFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, range: YearRange) -> PathBuf {
        self.dir.join(ledger_file_name(range))
    }

    fn check_header(path: &Path) -> Result<(), LedgerError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| csv_error(path, e))?;
        let mut first = csv::StringRecord::new();
        let found = reader
            .read_record(&mut first)
            .map_err(|e| csv_error(path, e))?;
        if !found || first.iter().ne(LEDGER_HEADERS.iter().copied()) {
            return Err(LedgerError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("first line must be {}", LEDGER_HEADERS.join(",")),
            });
        }
        Ok(())
    }

    fn encode(&self, block: &LedgerBlock, path: &Path) -> Result<Vec<u8>, LedgerError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        for record in block.records(self.format) {
            writer
                .write_record(record.fields())
                .map_err(|e| csv_error(path, e))?;
        }
        writer.into_inner().map_err(|e| LedgerError::Io {
            path: path.to_path_buf(),
            source: e.into_error(),
        })
    }
}

impl LedgerStore for CsvLedgerStore {
    fn open_or_create(&self, range: YearRange) -> Result<LedgerHandle, LedgerError> {
        let path = self.path_for(range);
        let created = !path.exists();
        if created {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(LEDGER_HEADERS)
                .map_err(|e| csv_error(&path, e))?;
            let header = writer.into_inner().map_err(|e| LedgerError::Io {
                path: path.clone(),
                source: e.into_error(),
            })?;
            write_atomic(&path, &header).map_err(|source| LedgerError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), %range, "ledger created");
        } else {
            Self::check_header(&path)?;
        }
        Ok(LedgerHandle {
            range,
            location: path,
            created,
        })
    }

    fn append(&self, handle: &LedgerHandle, block: &LedgerBlock) -> Result<(), LedgerError> {
        let path = handle.location.as_path();
        let io_error = |source: io::Error| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut contents = fs::read(path).map_err(io_error)?;
        if contents.last().is_some_and(|b| *b != b'\n') {
            contents.push(b'\n');
        }
        contents.extend(self.encode(block, path)?);
        write_atomic(path, &contents).map_err(io_error)?;

        tracing::info!(
            path = %path.display(),
            lines = block.line_count(),
            total = block.totals().total,
            "block appended"
        );
        Ok(())
    }

    fn records(&self, handle: &LedgerHandle) -> Result<Vec<LedgerRecord>, LedgerError> {
        let path = handle.location.as_path();
        Self::check_header(path)?;
        let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;
        reader
            .deserialize()
            .collect::<Result<Vec<LedgerRecord>, _>>()
            .map_err(|e| csv_error(path, e))
    }
}

fn csv_error(path: &Path, err: csv::Error) -> LedgerError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LedgerError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => LedgerError::Corrupt {
            path: path.to_path_buf(),
            reason,
        },
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;

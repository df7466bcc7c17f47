// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop opener backed by the platform launcher

use super::{FileOpener, OpenError};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens files with `open` (macOS), `start` (Windows) or `xdg-open` (elsewhere)
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemOpener;

impl SystemOpener {
    pub fn new() -> Self {
        Self
    }
}

/// Launcher program and its arguments for `path`
pub(crate) fn launcher(path: &Path) -> (&'static str, Vec<OsString>) {
    if cfg!(target_os = "macos") {
        ("open", vec![path.as_os_str().to_owned()])
    } else if cfg!(windows) {
        // Empty title argument so a quoted path is not taken as the window title
        (
            "cmd",
            vec![
                OsString::from("/C"),
                OsString::from("start"),
                OsString::from(""),
                path.as_os_str().to_owned(),
            ],
        )
    } else {
        ("xdg-open", vec![path.as_os_str().to_owned()])
    }
}

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        if !path.exists() {
            return Err(OpenError::NotFound(path.to_path_buf()));
        }

        let (program, args) = launcher(path);
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| OpenError::Launch { program, source })?;

        if !status.success() {
            return Err(OpenError::Failed {
                program,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;

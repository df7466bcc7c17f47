// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File logging for a run

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;

use crate::paths::Paths;

/// Send tracing output to the log file in the home directory
///
/// The level defaults to `info` and follows `RUST_LOG` when set. Keep the
/// returned guard alive until exit so buffered lines are flushed.
pub fn init(paths: &Paths) -> Result<WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(&paths.home)
        .with_context(|| format!("cannot create {}", paths.home.display()))?;

    let file_name = paths
        .log
        .file_name()
        .context("log path has no file name")?;
    let file_appender = tracing_appender::rolling::never(&paths.home, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .context("logging was already initialised")?;

    Ok(guard)
}

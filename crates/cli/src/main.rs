// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! thermo - Thermo Tracker CLI
//!
//! Guided entry of radiator heat cost allocator readings into a per-season
//! CSV ledger.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod adapters;
mod error;
mod logging;
mod paths;
mod prompt;
mod setup;
mod workflow;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::RealAdapters;
use crate::error::ThermoError;
use crate::paths::Paths;
use crate::prompt::Prompter;
use crate::workflow::Workflow;

#[derive(Parser)]
#[command(
    name = "thermo",
    version,
    about = "Thermo Tracker - record radiator heat cost allocator readings"
)]
struct Cli {
    /// Directory holding the registry, preferences and ledgers
    #[arg(long, value_name = "DIR")]
    home: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ThermoError>() {
                Some(report) => eprint!("{}", report),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = Paths::resolve(cli.home.as_deref())?;
    let _log_guard = logging::init(&paths)?;
    tracing::info!(home = %paths.home.display(), "starting");

    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let adapters = RealAdapters::new(&paths.ledger_dir);
    let mut workflow = Workflow::new(paths, prompter, adapters);

    match workflow.run() {
        Ok(summary) => {
            tracing::info!(
                ledger = %summary.ledger.display(),
                created = summary.created,
                lines = summary.lines,
                "run complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e.message, "run failed");
            Err(e.into())
        }
    }
}

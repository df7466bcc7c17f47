// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One run of the tool as an explicit state machine
//!
//! ```text
//! Uninitialized -> RegistryLoaded -> ConfigLoaded -> SessionBuilt -> LedgerAppended -> Done
//! ```
//!
//! Each state has one handler that returns the next state. Rejected answers
//! loop inside a handler; any error ends the run before the ledger is touched,
//! except in `SessionBuilt` where the append itself either lands or not.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use thermo_adapters::FileOpener;
use thermo_core::input::parse_non_negative;
use thermo_core::ledger::total_of;
use thermo_core::{
    Clock, DateMode, DeviceId, LedgerBlock, LedgerHandle, LedgerStore, Preferences, Registry,
    SessionBuilder,
};
use thermo_storage::{ConfigStore, RegistryStore};

use crate::adapters::Adapters;
use crate::error::ThermoError;
use crate::paths::Paths;
use crate::prompt::{PromptError, Prompter};
use crate::setup;

/// Registry and preferences for the rest of the run
#[derive(Debug, Clone)]
pub struct Context {
    pub registry: Registry,
    pub preferences: Preferences,
}

/// What a completed run wrote
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub ledger: PathBuf,
    /// The ledger file was created by this run
    pub created: bool,
    /// Lines appended, device rows plus the totals row
    pub lines: usize,
    pub total: f64,
}

#[derive(Debug)]
pub enum State {
    Uninitialized,
    RegistryLoaded(Registry),
    ConfigLoaded(Context),
    SessionBuilt {
        context: Context,
        handle: LedgerHandle,
        block: LedgerBlock,
    },
    LedgerAppended(Summary),
    Done(Summary),
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::Uninitialized => "uninitialized",
            State::RegistryLoaded(_) => "registry_loaded",
            State::ConfigLoaded(_) => "config_loaded",
            State::SessionBuilt { .. } => "session_built",
            State::LedgerAppended(_) => "ledger_appended",
            State::Done(_) => "done",
        }
    }
}

pub struct Workflow<R, W, A> {
    paths: Paths,
    prompter: Prompter<R, W>,
    adapters: A,
}

impl<R: BufRead, W: Write, A: Adapters> Workflow<R, W, A> {
    pub fn new(paths: Paths, prompter: Prompter<R, W>, adapters: A) -> Self {
        Self {
            paths,
            prompter,
            adapters,
        }
    }

    /// Drive the state machine from the start until `Done`
    pub fn run(&mut self) -> Result<Summary, ThermoError> {
        let mut state = State::Uninitialized;
        loop {
            tracing::debug!(state = state.name(), "entering state");
            state = match state {
                State::Uninitialized => self.load_registry()?,
                State::RegistryLoaded(registry) => self.load_preferences(registry)?,
                State::ConfigLoaded(context) => self.build_session(context)?,
                State::SessionBuilt {
                    context,
                    handle,
                    block,
                } => self.append_block(&context, handle, block)?,
                State::LedgerAppended(summary) => self.offer_open(summary)?,
                State::Done(summary) => return Ok(summary),
            };
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn load_registry(&mut self) -> Result<State, ThermoError> {
        let store = RegistryStore::new(&self.paths.registry);
        let registry = match store.load() {
            Ok(registry) if !registry.is_empty() => {
                setup::review_registry(&mut self.prompter, &store, registry)?
            }
            Ok(_) => self.first_registry(&store)?,
            Err(e) if e.is_not_found() => self.first_registry(&store)?,
            Err(e) => return Err(e.into()),
        };
        tracing::info!(devices = registry.len(), "registry ready");
        Ok(State::RegistryLoaded(registry))
    }

    fn first_registry(&mut self, store: &RegistryStore) -> Result<Registry, ThermoError> {
        let registry = setup::first_registry(&mut self.prompter)?;
        store.save(&registry)?;
        self.prompter
            .say(format!("Saved {} radiators.", registry.len()))?;
        Ok(registry)
    }

    fn load_preferences(&mut self, registry: Registry) -> Result<State, ThermoError> {
        let store = ConfigStore::new(&self.paths.config);
        let preferences = match store.load() {
            Ok(current) => match setup::review_preferences(&mut self.prompter, current)? {
                Some(updated) => {
                    store.save(&updated)?;
                    updated
                }
                None => current,
            },
            Err(e) if e.is_not_found() => {
                let today = self.adapters.clock().today();
                let prefs = setup::first_preferences(&mut self.prompter, today)?;
                store.save(&prefs)?;
                prefs
            }
            Err(e) => return Err(e.into()),
        };
        Ok(State::ConfigLoaded(Context {
            registry,
            preferences,
        }))
    }

    fn build_session(&mut self, context: Context) -> Result<State, ThermoError> {
        let prefs = context.preferences;
        let ledger = self.adapters.ledger(prefs.date_format);
        let handle = ledger.open_or_create(prefs.tracked_years)?;
        if handle.created {
            self.prompter
                .say(format!("Starting a new ledger: {}", handle.location.display()))?;
        } else {
            self.prompter
                .say(format!("Adding to ledger: {}", handle.location.display()))?;
        }
        let previous = ledger.previous_valve_settings(&handle)?;

        let mut builder = SessionBuilder::new(&context.registry, &prefs);
        self.choose_date(&mut builder, &prefs)?;
        loop {
            self.collect_readings(&mut builder, &context.registry, &previous)?;
            self.show_recap(&builder, &context.registry)?;
            if self.prompter.confirm("Are these readings correct?", true)? {
                break;
            }
            builder.restart_readings();
        }

        let note = self
            .prompter
            .optional("Note for this session (press Enter to skip):")?;
        builder.set_note(note.as_deref());

        let session = builder.finish()?;
        let block = session.derive(&context.registry)?;
        Ok(State::SessionBuilt {
            context,
            handle,
            block,
        })
    }

    fn choose_date(
        &mut self,
        builder: &mut SessionBuilder<'_>,
        prefs: &Preferences,
    ) -> Result<(), ThermoError> {
        if prefs.date_mode == DateMode::Automatic {
            let clock = self.adapters.clock();
            match builder.use_today(&clock) {
                Ok(date) => {
                    self.prompter
                        .say(format!("Session date: {}", prefs.date_format.format(date)))?;
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "automatic date rejected, asking instead");
                    self.prompter
                        .say(format!("Today's date cannot be used: {}.", e))?;
                }
            }
        }
        let question = format!("Session date ({}):", prefs.date_format.label());
        self.prompter
            .ask(&question, |answer: &str| builder.enter_date(answer))?;
        Ok(())
    }

    fn collect_readings(
        &mut self,
        builder: &mut SessionBuilder<'_>,
        registry: &Registry,
        previous: &HashMap<DeviceId, f64>,
    ) -> Result<(), ThermoError> {
        let count = registry.len();
        while let Some(device) = builder.current_device() {
            let position = count - builder.remaining() + 1;
            self.prompter
                .say(format!("[{}/{}] {}", position, count, device))?;
            let valve = self.prompter.ask_or(
                "  Valve setting:",
                previous.get(&device.id).copied(),
                parse_non_negative,
            )?;
            let raw = self.prompter.ask("  Raw reading:", |answer: &str| {
                parse_non_negative(answer).and_then(|raw| builder.check_raw_value(raw))
            })?;
            builder.record(valve, raw)?;
        }
        Ok(())
    }

    fn show_recap(
        &mut self,
        builder: &SessionBuilder<'_>,
        registry: &Registry,
    ) -> Result<(), ThermoError> {
        self.prompter.say("Readings:")?;
        let mut actuals = Vec::with_capacity(registry.len());
        for (reading, device) in builder.readings().iter().zip(registry.iter()) {
            let actual = reading.raw_value * device.coefficient;
            actuals.push(actual);
            self.prompter.say(format!(
                "  {}: valve {}, raw {} -> actual {}",
                device.name, reading.valve_setting, reading.raw_value, actual
            ))?;
        }
        self.prompter
            .say(format!("  Total: {}", total_of(actuals)))?;
        Ok(())
    }

    fn append_block(
        &mut self,
        context: &Context,
        handle: LedgerHandle,
        block: LedgerBlock,
    ) -> Result<State, ThermoError> {
        let ledger = self.adapters.ledger(context.preferences.date_format);
        ledger.append(&handle, &block)?;

        let summary = Summary {
            ledger: handle.location,
            created: handle.created,
            lines: block.line_count(),
            total: block.totals().total,
        };
        tracing::info!(
            ledger = %summary.ledger.display(),
            lines = summary.lines,
            total = summary.total,
            "session saved"
        );
        self.prompter.say(format!(
            "Saved {} rows to {}",
            summary.lines,
            summary.ledger.display()
        ))?;
        self.prompter
            .say(format!("Session total: {}", summary.total))?;
        Ok(State::LedgerAppended(summary))
    }

    /// The session is already saved here, so a closed input just skips the offer
    fn offer_open(&mut self, summary: Summary) -> Result<State, ThermoError> {
        let open = match self.prompter.confirm("Open the ledger now?", false) {
            Ok(open) => open,
            Err(PromptError::Closed) => false,
            Err(e) => return Err(e.into()),
        };
        if open {
            if let Err(e) = self.adapters.opener().open(&summary.ledger) {
                self.prompter
                    .say(format!("Could not open the ledger: {}", e))?;
            }
        }
        Ok(State::Done(summary))
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! First-time setup and the review/edit flows for registry and preferences

use chrono::{Datelike, NaiveDate};
use std::io::{BufRead, Write};
use thermo_core::input::{parse_coefficient, parse_device_count, parse_device_id, parse_name};
use thermo_core::{
    DateFormat, DateMode, Device, InputError, Preferences, Registry, Upsert, YearRange,
};
use thermo_storage::RegistryStore;

use crate::error::ThermoError;
use crate::prompt::{PromptError, Prompter};

/// Register every radiator from scratch
pub fn first_registry<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Registry, PromptError> {
    prompter.say("No radiators registered yet. Let's add them.")?;
    let count = prompter.ask("How many radiators do you want to track?", parse_device_count)?;

    let mut registry = Registry::new();
    for position in 1..=count {
        loop {
            prompter.say(format!("Radiator {} of {}", position, count))?;
            let name = prompter.ask("  Name:", parse_name)?;
            let id = prompter.ask_or("  ID:", Some(registry.next_free_id()), |answer: &str| {
                let id = parse_device_id(answer)?;
                match registry.get(id) {
                    Some(_) => Err(InputError::IdInUse(id)),
                    None => Ok(id),
                }
            })?;
            let coefficient = prompter.ask("  Coefficient:", parse_coefficient)?;

            let device = Device {
                id,
                name,
                coefficient,
            };
            if prompter.confirm(&format!("Save {}?", device), true)? {
                registry.upsert(device);
                break;
            }
        }
    }
    Ok(registry)
}

/// Show the registry and let the user add or update devices
///
/// Each confirmed change is persisted through `store` before the next
/// question; the updated registry is returned.
pub fn review_registry<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &RegistryStore,
    mut registry: Registry,
) -> Result<Registry, ThermoError> {
    prompter.say("Registered radiators:")?;
    for device in registry.iter() {
        prompter.say(format!("  {}", device))?;
    }
    if !prompter.confirm("Add or update a radiator?", false)? {
        return Ok(registry);
    }

    loop {
        let id = prompter.ask_or(
            "  ID of the radiator to add or update:",
            Some(registry.next_free_id()),
            parse_device_id,
        )?;
        let existing = registry.get(id).cloned();
        let name = prompter.ask_or(
            "  Name:",
            existing.as_ref().map(|d| d.name.clone()),
            parse_name,
        )?;
        let coefficient = prompter.ask_or(
            "  Coefficient:",
            existing.as_ref().map(|d| d.coefficient),
            parse_coefficient,
        )?;

        let device = Device {
            id,
            name,
            coefficient,
        };
        if prompter.confirm(&format!("Save {}?", device), true)? {
            let (stored, outcome) = store.upsert(device)?;
            registry = stored;
            let verb = match outcome {
                Upsert::Added => "Added",
                Upsert::Updated => "Updated",
            };
            prompter.say(format!("  {} radiator {}.", verb, id))?;
        }
        if !prompter.confirm("Add or update another radiator?", false)? {
            return Ok(registry);
        }
    }
}

/// Preferences offered on first run
pub fn default_preferences(today: NaiveDate) -> Preferences {
    Preferences {
        date_format: DateFormat::Dmy,
        date_mode: DateMode::Manual,
        tracked_years: YearRange::season_starting(today.year()),
    }
}

pub fn first_preferences<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    today: NaiveDate,
) -> Result<Preferences, PromptError> {
    prompter.say("No preferences saved yet. Press Enter to accept a suggestion.")?;
    ask_preferences(prompter, default_preferences(today))
}

/// Show the preferences and let the user change them; `None` when unchanged
pub fn review_preferences<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    current: Preferences,
) -> Result<Option<Preferences>, PromptError> {
    show_preferences(prompter, &current)?;
    if !prompter.confirm("Change preferences?", false)? {
        return Ok(None);
    }
    let updated = ask_preferences(prompter, current)?;
    Ok((updated != current).then_some(updated))
}

pub fn show_preferences<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prefs: &Preferences,
) -> Result<(), PromptError> {
    prompter.say(format!("Tracked years: {}", prefs.tracked_years))?;
    prompter.say(format!("Date format:   {}", prefs.date_format))?;
    prompter.say(format!("Date entry:    {}", prefs.date_mode))
}

fn ask_preferences<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    defaults: Preferences,
) -> Result<Preferences, PromptError> {
    let tracked_years = prompter.ask_or(
        "Tracked years (YYYY-YYYY):",
        Some(defaults.tracked_years),
        |answer: &str| answer.parse::<YearRange>(),
    )?;
    let date_format = prompter.ask_or(
        &format!("Date format ({}):", DateFormat::CHOICES),
        Some(defaults.date_format),
        |answer: &str| answer.parse::<DateFormat>(),
    )?;
    let date_mode = prompter.ask_or(
        &format!("Date entry ({}):", DateMode::CHOICES),
        Some(defaults.date_mode),
        |answer: &str| answer.parse::<DateMode>(),
    )?;
    Ok(Preferences {
        date_format,
        date_mode,
        tracked_years,
    })
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod tests;

//! Error reporting specs
//!
//! Unrecoverable failures exit with code 1 and leave files untouched.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn closed_stdin_mid_session_appends_nothing() {
    let home = Home::seeded();

    home.thermo()
        .stdin("\n\n01/04/2025\n2\n10\n")
        .fails()
        .code_is(1)
        .stderr_has("error: Input closed before the session was saved")
        .stderr_has("No rows were written");

    assert_eq!(
        home.read("radiators_usage/radiators_usage_2025-2026.csv"),
        format!("{HEADER}\n")
    );
}

#[test]
fn duplicate_registry_ids_are_reported() {
    let home = Home::empty();
    let registry = "id,name,coefficient\n1,Kitchen,1\n1,Gym,2\n";
    home.file("radiators_registry.csv", registry);

    home.thermo()
        .stdin("")
        .fails()
        .code_is(1)
        .stderr_has("is corrupted")
        .stderr_has("device id 1 appears more than once")
        .stderr_has("suggestions:");

    assert_eq!(home.read("radiators_registry.csv"), registry);
}

#[test]
fn malformed_preferences_are_reported() {
    let home = Home::empty();
    home.file("radiators_registry.csv", SAMPLE_REGISTRY);
    home.file("config.json", "{ not json");

    home.thermo()
        .stdin("\n")
        .fails()
        .stderr_has("config.json is corrupted");
}

#[test]
fn foreign_ledger_file_is_not_overwritten() {
    let home = Home::seeded();
    home.file("radiators_usage/radiators_usage_2025-2026.csv", "a,b,c\n1,2,3\n");

    home.thermo()
        .stdin(sample_session("01/04/2025"))
        .fails()
        .stderr_has("is not a Thermo Tracker ledger");

    assert_eq!(
        home.read("radiators_usage/radiators_usage_2025-2026.csv"),
        "a,b,c\n1,2,3\n"
    );
}

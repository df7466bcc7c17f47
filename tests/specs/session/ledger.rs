//! Ledger append specs
//!
//! Every run appends one block: a row per radiator then a totals row. Earlier
//! rows are never rewritten and each season gets its own file.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn each_run_appends_one_block() {
    let home = Home::seeded();

    home.thermo().stdin(sample_session("01/04/2025")).passes();
    let first = home.read("radiators_usage/radiators_usage_2025-2026.csv");
    assert_eq!(home.ledger_rows("2025-2026").len(), 4);

    home.thermo()
        .stdin(sample_session("01/05/2025"))
        .passes()
        .stdout_has("Adding to ledger")
        .stdout_lacks("No radiators registered yet");

    let second = home.read("radiators_usage/radiators_usage_2025-2026.csv");
    assert!(second.starts_with(&first));
    let rows = home.ledger_rows("2025-2026");
    assert_eq!(rows.len(), 8);
    assert_eq!(&rows[4][0], "01/05/2025");
    assert_eq!(&rows[7][6], "69");
}

#[test]
fn previous_valve_settings_are_offered() {
    let home = Home::seeded();
    home.thermo().stdin(sample_session("01/04/2025")).passes();

    // Accept every offered valve setting
    home.thermo()
        .stdin("\n\n02/04/2025\n\n11\n\n8\n\n16\n\nwindows open\nn\n")
        .passes()
        .stdout_has("Valve setting: [2.5]");

    let rows = home.ledger_rows("2025-2026");
    let valves: Vec<&str> = rows[4..7].iter().map(|r| &r[7]).collect();
    assert_eq!(valves, vec!["2", "2.5", "3"]);
    assert!(rows[4..7].iter().all(|r| &r[8] == "windows open"));
    assert_eq!(&rows[7][6], "75");
}

#[test]
fn new_season_gets_its_own_ledger() {
    let home = Home::seeded();
    home.thermo().stdin(sample_session("01/04/2025")).passes();
    let old = home.read("radiators_usage/radiators_usage_2025-2026.csv");

    // Change the tracked years, keep format and mode
    home.thermo()
        .stdin("\ny\n2026-2027\n\n\n01/10/2026\n2\n10\n2.5\n7\n3\n15\n\n\nn\n")
        .passes()
        .stdout_has("Starting a new ledger");

    assert_eq!(
        home.read("radiators_usage/radiators_usage_2025-2026.csv"),
        old
    );
    assert_eq!(home.ledger_rows("2026-2027").len(), 4);
}

#[test]
fn date_outside_season_is_asked_again() {
    let home = Home::seeded();

    home.thermo()
        .stdin(sample_session("01/04/2024\n01/04/2025"))
        .passes()
        .stdout_has("falls outside the tracked years 2025-2026");
    assert_eq!(&home.ledger_rows("2025-2026")[0][0], "01/04/2025");
}

#[test]
fn updated_coefficient_applies_to_new_rows_only() {
    let home = Home::seeded();
    home.thermo().stdin(sample_session("01/04/2025")).passes();

    // Update the Gym coefficient to 4, then record the same readings
    let input = "y\n2\n\n4\n\nn\n\n02/04/2025\n\n10\n\n7\n\n15\n\n\nn\n";
    home.thermo().stdin(input).passes();

    let rows = home.ledger_rows("2025-2026");
    assert_eq!(&rows[2][3], "3");
    assert_eq!(&rows[2][5], "45");
    assert_eq!(&rows[6][3], "4");
    assert_eq!(&rows[6][5], "60");
    assert_eq!(&rows[7][6], "84");
    assert!(home.read("radiators_registry.csv").contains("2,Gym,4\n"));
}

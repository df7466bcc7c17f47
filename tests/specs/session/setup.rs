//! First-run specs
//!
//! With an empty home the tool registers radiators, saves preferences and
//! records the first session in one run.

use crate::prelude::*;
use similar_asserts::assert_eq;

const FIRST_RUN: &str = "3\n\
    Kitchen\n0\n1\n\n\
    Living Room\n1\n2\n\n\
    Gym\n2\n3\n\n\
    2025-2026\nDMY\nmanual\n\
    01/04/2025\n\
    2\n10\n\
    2.5\n7\n\
    3\n15\n\
    \n\
    \n\
    n\n";

#[test]
fn first_run_creates_registry_config_and_ledger() {
    let home = Home::empty();

    home.thermo()
        .stdin(FIRST_RUN)
        .passes()
        .stdout_has("How many radiators do you want to track?")
        .stdout_has("Starting a new ledger")
        .stdout_has("Saved 4 rows")
        .stdout_has("Session total: 69");

    assert_eq!(home.read("radiators_registry.csv"), SAMPLE_REGISTRY);
    assert_eq!(home.read("config.json"), MANUAL_CONFIG);
    assert!(home.path().join("thermo-tracker.log").exists());
}

#[test]
fn first_run_writes_documented_rows() {
    let home = Home::empty();
    home.thermo().stdin(FIRST_RUN).passes();

    assert_eq!(
        home.read("radiators_usage/radiators_usage_2025-2026.csv"),
        format!(
            "{HEADER}\n\
             01/04/2025,Kitchen,0,1,10,10,,2,\n\
             01/04/2025,Living Room,1,2,7,14,,2.5,\n\
             01/04/2025,Gym,2,3,15,45,,3,\n\
             01/04/2025,,,,,,69,,\n"
        )
    );
}

#[test]
fn invalid_answers_are_asked_again() {
    let home = Home::empty();
    let input = FIRST_RUN.replacen("3\n", "none\n0\n3\n", 1);

    home.thermo()
        .stdin(input)
        .passes()
        .stdout_has("invalid input: 'none' is not a valid count")
        .stdout_has("invalid input: '0' is not a valid count");
    assert_eq!(home.ledger_rows("2025-2026").len(), 4);
}

//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_home_flag() {
    let home = Home::empty();
    home.thermo()
        .args(&["--help"])
        .passes()
        .stdout_has("Thermo Tracker")
        .stdout_has("--home <DIR>");
}

#[test]
fn version_prints_package_version() {
    let home = Home::empty();
    home.thermo()
        .args(&["--version"])
        .passes()
        .stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn unknown_flag_is_rejected() {
    let home = Home::empty();
    home.thermo()
        .args(&["--frobnicate"])
        .fails()
        .stderr_has("--frobnicate");
}

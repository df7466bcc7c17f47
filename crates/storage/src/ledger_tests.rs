// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;
use thermo_core::DerivedRow;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn block(on: NaiveDate, note: Option<&str>) -> LedgerBlock {
    let row = |id, name: &str, coefficient: f64, raw: f64, valve| DerivedRow {
        date: on,
        device_name: name.to_string(),
        device_id: id,
        coefficient,
        raw_value: raw,
        actual_value: raw * coefficient,
        valve_setting: valve,
        note: note.map(String::from),
    };
    LedgerBlock::new(
        on,
        vec![
            row(0, "Kitchen", 1.0, 10.0, 2.0),
            row(1, "Living Room", 2.0, 7.0, 2.5),
            row(2, "Gym", 3.0, 15.0, 3.0),
        ],
    )
}

fn range() -> YearRange {
    YearRange::new(2025, 2026).unwrap()
}

const HEADER: &str =
    "Date,Radiator Name,Radiator ID,Coefficient,Raw Reading,Actual Value,Total,Valve Setting,Notes\n";

#[test]
fn file_name_carries_year_range() {
    assert_eq!(ledger_file_name(range()), "radiators_usage_2025-2026.csv");
}

#[test]
fn first_open_creates_file_with_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path().join("radiators_usage"), DateFormat::Dmy);

    let handle = store.open_or_create(range()).unwrap();
    assert!(handle.created);
    assert_eq!(handle.location, store.path_for(range()));
    assert_eq!(fs::read_to_string(&handle.location).unwrap(), HEADER);
    assert!(store.records(&handle).unwrap().is_empty());

    let again = store.open_or_create(range()).unwrap();
    assert!(!again.created);
}

#[test]
fn append_writes_rows_then_totals() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Dmy);
    let handle = store.open_or_create(range()).unwrap();

    store
        .append(&handle, &block(date(2025, 4, 1), Some("windows open")))
        .unwrap();

    let text = fs::read_to_string(&handle.location).unwrap();
    similar_asserts::assert_eq!(
        text,
        format!(
            "{HEADER}\
             01/04/2025,Kitchen,0,1,10,10,,2,windows open\n\
             01/04/2025,Living Room,1,2,7,14,,2.5,windows open\n\
             01/04/2025,Gym,2,3,15,45,,3,windows open\n\
             01/04/2025,,,,,,69,,\n"
        )
    );
}

#[test]
fn second_append_leaves_earlier_rows_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Mdy);
    let handle = store.open_or_create(range()).unwrap();
    store.append(&handle, &block(date(2025, 4, 1), None)).unwrap();
    let before = fs::read_to_string(&handle.location).unwrap();

    let reopened = store.open_or_create(range()).unwrap();
    store
        .append(&reopened, &block(date(2025, 5, 2), None))
        .unwrap();

    let after = fs::read_to_string(&handle.location).unwrap();
    assert!(after.starts_with(&before));
    let records = store.records(&reopened).unwrap();
    assert_eq!(records.len(), 8);
    assert_eq!(records[4].date, "05/02/2025");
    assert!(records[7].is_totals());
    assert_eq!(records[7].total, Some(69.0));
}

#[test]
fn records_parse_back_into_cells() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Dmy);
    let handle = store.open_or_create(range()).unwrap();
    let written = block(date(2025, 4, 1), Some("a, b"));
    store.append(&handle, &written).unwrap();

    assert_eq!(
        store.records(&handle).unwrap(),
        written.records(DateFormat::Dmy)
    );
    assert_eq!(store.previous_valve_settings(&handle).unwrap()[&1], 2.5);
}

#[test]
fn year_ranges_get_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Dmy);
    let old = store.open_or_create(range()).unwrap();
    store.append(&old, &block(date(2025, 4, 1), None)).unwrap();
    let old_text = fs::read_to_string(&old.location).unwrap();

    let next = store
        .open_or_create(YearRange::new(2026, 2027).unwrap())
        .unwrap();
    assert!(next.created);
    assert_ne!(next.location, old.location);
    store.append(&next, &block(date(2026, 10, 1), None)).unwrap();

    assert_eq!(fs::read_to_string(&old.location).unwrap(), old_text);
}

#[test]
fn missing_trailing_newline_is_repaired_before_append() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Dmy);
    fs::write(store.path_for(range()), HEADER.trim_end()).unwrap();

    let handle = store.open_or_create(range()).unwrap();
    store.append(&handle, &block(date(2025, 4, 1), None)).unwrap();
    assert_eq!(store.records(&handle).unwrap().len(), 4);
}

#[test]
fn foreign_file_is_rejected_and_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Dmy);
    let path = store.path_for(range());
    fs::write(&path, "something,else\n").unwrap();

    let err = store.open_or_create(range()).unwrap_err();
    assert!(matches!(err, LedgerError::Corrupt { .. }));
    assert_eq!(err.path(), path.as_path());
    assert_eq!(fs::read_to_string(&path).unwrap(), "something,else\n");
}

#[test]
fn append_to_vanished_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Dmy);
    let handle = store.open_or_create(range()).unwrap();
    fs::remove_file(&handle.location).unwrap();

    let err = store
        .append(&handle, &block(date(2025, 4, 1), None))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Io { .. }));
    assert!(!handle.location.exists());
}

#[test]
fn failed_append_leaves_ledger_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvLedgerStore::new(dir.path(), DateFormat::Dmy);
    let handle = store.open_or_create(range()).unwrap();
    store.append(&handle, &block(date(2025, 4, 1), None)).unwrap();
    let before = fs::read(&handle.location).unwrap();

    // A directory where the temp file goes makes the commit fail
    let blocker = dir.path().join("radiators_usage_2025-2026.csv.tmp");
    fs::create_dir(&blocker).unwrap();

    let err = store
        .append(&handle, &block(date(2025, 5, 1), Some("lost")))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Io { .. }));
    assert_eq!(err.path(), handle.location.as_path());
    assert_eq!(fs::read(&handle.location).unwrap(), before);
    assert_eq!(store.records(&handle).unwrap().len(), 4);
}

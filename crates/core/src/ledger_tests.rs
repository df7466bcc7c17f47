// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row(id: DeviceId, name: &str, coefficient: f64, raw: f64, valve: f64) -> DerivedRow {
    DerivedRow {
        date: date(2025, 4, 1),
        device_name: name.to_string(),
        device_id: id,
        coefficient,
        raw_value: raw,
        actual_value: raw * coefficient,
        valve_setting: valve,
        note: None,
    }
}

fn sample_block() -> LedgerBlock {
    LedgerBlock::new(
        date(2025, 4, 1),
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

#[test]
fn block_records_end_with_totals_line() {
    let records = sample_block().records(DateFormat::Dmy);
    assert_eq!(records.len(), 4);

    assert_eq!(records[1].date, "01/04/2025");
    assert_eq!(records[1].device_id, Some(1));
    assert_eq!(records[1].actual_value, Some(14.0));
    assert_eq!(records[1].total, None);
    assert!(!records[1].is_totals());

    let totals = &records[3];
    assert!(totals.is_totals());
    assert_eq!(
        totals,
        &LedgerRecord {
            date: "01/04/2025".to_string(),
            total: Some(69.0),
            ..LedgerRecord::default()
        }
    );
}

#[test]
fn record_fields_follow_header_order() {
    let records = sample_block().records(DateFormat::Mdy);
    assert_eq!(
        records[1].fields(),
        ["04/01/2025", "Living Room", "1", "2", "7", "14", "", "2.5", ""].map(String::from)
    );
    assert_eq!(
        records[3].fields(),
        ["04/01/2025", "", "", "", "", "", "69", "", ""].map(String::from)
    );
}

#[test]
fn empty_block_still_has_totals_line() {
    let block = LedgerBlock::new(date(2025, 4, 1), Vec::new());
    assert_eq!(block.line_count(), 1);
    assert_eq!(block.totals().total, 0.0);
}

#[test]
fn previous_valve_settings_reads_last_block_only() {
    let mut records = sample_block().records(DateFormat::Dmy);
    let mut second = LedgerBlock::new(
        date(2025, 5, 1),
        vec![row(0, "Kitchen", 1.0, 12.0, 4.0), row(2, "Gym", 3.0, 20.0, 1.5)],
    )
    .records(DateFormat::Dmy);
    records.append(&mut second);

    let settings = previous_valve_settings(&records);
    assert_eq!(settings.len(), 2);
    assert_eq!(settings[&0], 4.0);
    assert_eq!(settings[&2], 1.5);
    assert!(!settings.contains_key(&1));
}

#[test]
fn previous_valve_settings_of_empty_ledger_is_empty() {
    assert!(previous_valve_settings(&[]).is_empty());
}

#[test]
fn fake_store_creates_once_and_appends() {
    let store = FakeLedgerStore::new(DateFormat::Dmy);

    let handle = store.open_or_create(range()).unwrap();
    assert!(handle.created);
    store.append(&handle, &sample_block()).unwrap();

    let reopened = store.open_or_create(range()).unwrap();
    assert!(!reopened.created);
    assert_eq!(store.records(&reopened).unwrap().len(), 4);
    assert_eq!(store.previous_valve_settings(&reopened).unwrap()[&1], 2.5);
}

#[test]
fn fake_store_failed_append_leaves_ledger_unchanged() {
    let store = FakeLedgerStore::new(DateFormat::Dmy);
    let handle = store.open_or_create(range()).unwrap();
    store.append(&handle, &sample_block()).unwrap();
    let before = store.ledger(range()).unwrap();

    store.fail_appends(true);
    let err = store.append(&handle, &sample_block()).unwrap_err();
    assert!(matches!(err, LedgerError::Io { .. }));
    assert_eq!(err.path(), handle.location.as_path());
    assert_eq!(store.ledger(range()).unwrap(), before);
}

#[test]
fn fake_store_keeps_ranges_apart() {
    let store = FakeLedgerStore::new(DateFormat::Mdy);
    let first = store.open_or_create(range()).unwrap();
    store.append(&first, &sample_block()).unwrap();

    let next = YearRange::new(2026, 2027).unwrap();
    let second = store.open_or_create(next).unwrap();
    assert!(second.created);
    assert!(store.records(&second).unwrap().is_empty());
    assert_eq!(store.ranges(), vec![range(), next]);
    assert_eq!(store.records(&first).unwrap()[0].date, "04/01/2025");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_opener_records_calls() {
    let opener = FakeOpener::new();

    opener.open(Path::new("/data/a.csv")).unwrap();
    opener.open(Path::new("/data/b.csv")).unwrap();

    let calls = opener.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path, PathBuf::from("/data/a.csv"));
}

#[test]
fn fake_opener_can_fail_and_still_records() {
    let opener = FakeOpener::new();
    opener.set_fail(true);

    let err = opener.open(Path::new("/data/a.csv")).unwrap_err();
    assert!(matches!(err, OpenError::Launch { .. }));
    assert_eq!(opener.calls().len(), 1);
}

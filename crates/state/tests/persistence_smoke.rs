use nsshub_engine::Fingerprint;
use nsshub_state::{load_fingerprints, save_fingerprints};
use std::collections::HashSet;
use tempfile::tempdir;

#[test]
fn ledger_round_trip() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("nested/ledger.json");

    let known: HashSet<Fingerprint> = [Fingerprint::of(b"one"), Fingerprint::of(b"two")]
        .into_iter()
        .collect();
    save_fingerprints(&path, &known).unwrap();

    let loaded = load_fingerprints(&path).unwrap();
    assert_eq!(loaded, known);
}

#[test]
fn missing_ledger_is_empty() {
    let tmp = tempdir().unwrap();
    let loaded = load_fingerprints(&tmp.path().join("absent.json")).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn malformed_entries_are_skipped() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("ledger.json");
    let good = Fingerprint::of(b"good");
    std::fs::write(
        &path,
        format!(r#"["not-a-digest", "{}"]"#, good.as_str()),
    )
    .unwrap();

    let loaded = load_fingerprints(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains(&good));
}

#[test]
fn corrupt_ledger_is_an_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("ledger.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_fingerprints(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing fingerprint ledger"));
}

//! Loading relay configuration from disk.

use std::io::Write;

use rootrelay::{Address, BudgetKind, RelayConfig, RelayError, DEFAULT_BUDGET};
use rootrelay_testkit::fixtures::{MESSENGER, MIRROR, OWNER, SOURCE};
use tempfile::NamedTempFile;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_round_trips_fixture_config() {
    let config = RelayConfig::new(SOURCE, MIRROR, MESSENGER, OWNER);
    let file = write_config(&serde_json::to_string_pretty(&config).unwrap());

    let loaded = RelayConfig::load(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_with_budgets() {
    let file = write_config(
        r#"{
            "source": "0x5151515151515151515151515151515151515151",
            "mirror": "0x4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d4d",
            "messenger": "0x7e7e7e7e7e7e7e7e7e7e7e7e7e7e7e7e7e7e7e7e",
            "owner": "0x0101010101010101010101010101010101010101",
            "budgets": { "set_expiry": 500000, "transfer_ownership": 75000 }
        }"#,
    );

    let config = RelayConfig::load(file.path()).unwrap();
    assert_eq!(config.mirror, MIRROR);
    assert_eq!(config.budgets.get(BudgetKind::PropagateRoot), DEFAULT_BUDGET);
    assert_eq!(config.budgets.get(BudgetKind::SetExpiry), 500_000);
    assert_eq!(config.budgets.get(BudgetKind::TransferOwnership), 75_000);
}

#[test]
fn test_load_rejects_zero_owner() {
    let file = write_config(&format!(
        r#"{{"source":"{SOURCE}","mirror":"{MIRROR}","messenger":"{MESSENGER}","owner":"{}"}}"#,
        Address::ZERO
    ));

    assert!(matches!(
        RelayConfig::load(file.path()),
        Err(RelayError::InvalidConfig(_))
    ));
}

#[test]
fn test_load_rejects_malformed_address() {
    let file = write_config(
        r#"{"source":"0x51","mirror":"0x4d","messenger":"0x7e","owner":"0x01"}"#,
    );
    assert!(matches!(
        RelayConfig::load(file.path()),
        Err(RelayError::Json(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = RelayConfig::load(dir.path().join("relay.json"));
    assert!(matches!(result, Err(RelayError::Io(_))));
}

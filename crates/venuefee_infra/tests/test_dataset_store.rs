//! File-backed dataset store: load, validated replacement, persistence.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Value, json};
use venuefee_core::{Dataset, dataset_fingerprint, validate_dataset};
use venuefee_infra::store::{DatasetStore, StoreError};

fn dataset_json(hyperliquid_maker: f64) -> Value {
    json!({
        "exchanges": [
            {
                "exchange": "Binance",
                "type": "CEX",
                "product": "perp",
                "day_basis": 30,
                "maker_fees": [{ "volume": 0, "fee": 2.0 }, { "volume": 15, "fee": 1.6 }],
                "taker_fees": [{ "volume": 0, "fee": 5.0 }]
            },
            {
                "exchange": "Hyperliquid",
                "type": "DEX",
                "product": "perp",
                "day_basis": 14,
                "maker_fees": [{ "volume": 0, "fee": hyperliquid_maker }],
                "taker_fees": [{ "volume": 0, "fee": 4.5 }, { "volume": 5, "fee": 4.0 }]
            }
        ]
    })
}

fn temp_dataset_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "venuefee_dataset_{tag}_{}_{}.json",
        std::process::id(),
        nanos
    ))
}

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn remove_if_exists(path: &Path) {
    let _ = std::fs::remove_file(path);
}

// --- Load --------------------------------------------------------------

#[test]
fn test_open_loads_valid_file() {
    let path = temp_dataset_path("open");
    write_json(&path, &dataset_json(1.5));

    let store = DatasetStore::open(&path).unwrap();
    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.exchange("Hyperliquid").unwrap().maker_fees.first().fee, 1.5);
    assert_eq!(store.path(), Some(path.as_path()));

    remove_if_exists(&path);
}

#[test]
fn test_open_missing_file_is_io_error() {
    let path = temp_dataset_path("missing");
    assert!(matches!(DatasetStore::open(&path), Err(StoreError::Io(_))));
}

#[test]
fn test_open_malformed_json_is_json_error() {
    let path = temp_dataset_path("malformed");
    std::fs::write(&path, "{ \"exchanges\": [").unwrap();
    assert!(matches!(DatasetStore::open(&path), Err(StoreError::Json(_))));
    remove_if_exists(&path);
}

#[test]
fn test_open_invalid_dataset_is_validation_error() {
    let path = temp_dataset_path("invalid");
    write_json(&path, &json!({ "exchanges": [] }));
    match DatasetStore::open(&path) {
        Err(StoreError::Validation(err)) => assert_eq!(err.path, "exchanges"),
        other => panic!("expected validation error, got {other:?}"),
    }
    remove_if_exists(&path);
}

// --- Replacement -------------------------------------------------------

#[test]
fn test_apply_update_persists_and_swaps() {
    let path = temp_dataset_path("update");
    write_json(&path, &dataset_json(1.5));
    let store = DatasetStore::open(&path).unwrap();

    let outcome = store.apply_update(&dataset_json(1.1)).unwrap();
    assert_eq!(outcome.exchanges, 2);
    assert_eq!(outcome.fingerprint, dataset_fingerprint(&store.snapshot()));

    let on_disk = validate_dataset(&read_json(&path)).unwrap();
    assert_eq!(on_disk, store.snapshot());
    assert_eq!(on_disk.exchange("Hyperliquid").unwrap().maker_fees.first().fee, 1.1);
    assert_eq!(store.metrics().updates_total(), 1);
    assert_eq!(store.metrics().rejected_total(), 0);

    // A fresh store sees the persisted document.
    let reopened = DatasetStore::open(&path).unwrap();
    assert_eq!(reopened.snapshot(), store.snapshot());

    remove_if_exists(&path);
}

#[test]
fn test_persisted_file_uses_two_space_indentation() {
    let path = temp_dataset_path("indent");
    write_json(&path, &dataset_json(1.5));
    let store = DatasetStore::open(&path).unwrap();
    store.apply_update(&dataset_json(1.2)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"exchanges\": [\n    {\n      \"exchange\": \"Binance\""));

    remove_if_exists(&path);
}

#[test]
fn test_rejected_update_leaves_file_and_memory_untouched() {
    let path = temp_dataset_path("rejected");
    write_json(&path, &dataset_json(1.5));
    let store = DatasetStore::open(&path).unwrap();
    let before_text = std::fs::read_to_string(&path).unwrap();
    let before = store.snapshot();

    let mut bad = dataset_json(1.1);
    bad["exchanges"][1]["type"] = json!("dex");
    let err = store.apply_update(&bad).unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before_text);
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.metrics().updates_total(), 0);
    assert_eq!(store.metrics().rejected_total(), 1);

    remove_if_exists(&path);
}

#[test]
fn test_replace_exchange_persists_single_edit() {
    let path = temp_dataset_path("replace");
    write_json(&path, &dataset_json(1.5));
    let store = DatasetStore::open(&path).unwrap();

    let mut binance = store.snapshot().exchange("Binance").unwrap().clone();
    binance.day_basis = NonZeroU32::new(7).unwrap();
    store.replace_exchange(&binance).unwrap();

    let on_disk = validate_dataset(&read_json(&path)).unwrap();
    assert_eq!(on_disk.exchange("Binance").unwrap().day_basis.get(), 7);
    assert_eq!(on_disk.exchange("Hyperliquid").unwrap().day_basis.get(), 14);
    assert_eq!(on_disk.exchanges()[0].name, "Binance");

    remove_if_exists(&path);
}

#[test]
fn test_replace_unknown_exchange_is_rejected() {
    let dataset = validate_dataset(&dataset_json(1.5)).unwrap();
    let store = DatasetStore::in_memory(dataset.clone());

    let mut ghost = dataset.exchange("Binance").unwrap().clone();
    ghost.name = "Kraken".to_string();
    let err = store.replace_exchange(&ghost).unwrap_err();

    assert!(matches!(err, StoreError::UnknownExchange(name) if name == "Kraken"));
    assert_eq!(store.snapshot(), dataset);
    assert_eq!(store.metrics().rejected_total(), 1);
}

#[test]
fn test_in_memory_store_swaps_without_file() {
    let store = DatasetStore::in_memory(validate_dataset(&dataset_json(1.5)).unwrap());
    assert!(store.path().is_none());

    store.apply_update(&dataset_json(0.9)).unwrap();
    let expected: Dataset = serde_json::from_value(dataset_json(0.9)).unwrap();
    assert_eq!(store.snapshot(), expected);
}

#[test]
fn test_write_failure_keeps_previous_dataset() {
    let dir = temp_dataset_path("write_failure");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dataset.json");
    write_json(&path, &dataset_json(1.5));
    let store = DatasetStore::open(&path).unwrap();
    let before = store.snapshot();

    // A directory squatting on the temp file name makes the write fail.
    std::fs::create_dir_all(dir.join("dataset.json.tmp")).unwrap();
    let err = store.apply_update(&dataset_json(0.5)).unwrap_err();

    assert!(matches!(err, StoreError::Io(_)));
    assert_eq!(store.snapshot(), before);
    assert_eq!(validate_dataset(&read_json(&path)).unwrap(), before);
    assert_eq!(store.metrics().updates_total(), 0);
    assert_eq!(store.metrics().rejected_total(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_failed_rename_removes_temp_file() {
    let dir = temp_dataset_path("rename_failure");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dataset.json");
    write_json(&path, &dataset_json(1.5));
    let store = DatasetStore::open(&path).unwrap();
    let before = store.snapshot();

    // Temp file writes fine, but the rename target is now a directory.
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir_all(&path).unwrap();
    let err = store.apply_update(&dataset_json(0.5)).unwrap_err();

    assert!(matches!(err, StoreError::Io(_)));
    assert!(!dir.join("dataset.json.tmp").exists());
    assert!(path.is_dir());
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.metrics().updates_total(), 0);
    assert_eq!(store.metrics().rejected_total(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

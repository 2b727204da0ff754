//! Structural validation of raw dataset documents.
//!
//! Every rejection names the offending field path; nothing is repaired.

mod common;

use common::{sample_dataset_json, sample_exchange_json};
use serde_json::{Value, json};
use venuefee_core::{
    Dataset, FeePoint, FeeSchedule, Product, ScheduleError, ValidationErrorKind, VenueType,
    validate_dataset, validate_exchange,
};

fn dataset_with(exchange: Value) -> Value {
    json!({ "exchanges": [exchange] })
}

fn with_field(key: &str, value: Value) -> Value {
    let mut exchange = sample_exchange_json();
    exchange[key] = value;
    dataset_with(exchange)
}

fn rejected(raw: &Value) -> (String, ValidationErrorKind) {
    let err = validate_dataset(raw).expect_err("document should be rejected");
    (err.path, err.kind)
}

// ─── Accepted documents ────────────────────────────────────────────────

#[test]
fn test_valid_dataset_is_accepted() {
    let dataset = validate_dataset(&sample_dataset_json()).unwrap();
    assert_eq!(dataset.len(), 3);

    let binance = &dataset.exchanges()[0];
    assert_eq!(binance.name, "Binance");
    assert_eq!(binance.venue_type, VenueType::Cex);
    assert_eq!(binance.product, Product::Perp);
    assert_eq!(binance.day_basis.get(), 30);
    assert_eq!(binance.maker_fees.points()[1], FeePoint::new(15.0, 1.6));

    assert_eq!(dataset.exchanges()[2].venue_type, VenueType::Nado);
    assert_eq!(dataset.exchanges()[2].product, Product::Spot);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let mut exchange = sample_exchange_json();
    exchange["website"] = json!("https://example.com");
    assert!(validate_dataset(&dataset_with(exchange)).is_ok());
}

#[test]
fn test_integral_float_day_basis_is_accepted() {
    let dataset = validate_dataset(&with_field("day_basis", json!(14.0))).unwrap();
    assert_eq!(dataset.exchanges()[0].day_basis.get(), 14);
}

#[test]
fn test_equal_thresholds_are_accepted() {
    let raw = with_field(
        "maker_fees",
        json!([{ "volume": 0, "fee": 2 }, { "volume": 0, "fee": 1 }]),
    );
    assert!(validate_dataset(&raw).is_ok());
}

// ─── Document shape ────────────────────────────────────────────────────

#[test]
fn test_root_must_be_object() {
    let (path, kind) = rejected(&json!([1, 2, 3]));
    assert_eq!(path, "(root)");
    assert_eq!(kind, ValidationErrorKind::WrongType { expected: "object" });
}

#[test]
fn test_missing_exchanges() {
    let (path, kind) = rejected(&json!({ "venues": [] }));
    assert_eq!(path, "exchanges");
    assert_eq!(kind, ValidationErrorKind::MissingField);
}

#[test]
fn test_empty_exchange_list() {
    let (path, kind) = rejected(&json!({ "exchanges": [] }));
    assert_eq!(path, "exchanges");
    assert_eq!(kind, ValidationErrorKind::EmptyDataset);
}

#[test]
fn test_exchange_entry_must_be_object() {
    let (path, kind) = rejected(&json!({ "exchanges": ["Binance"] }));
    assert_eq!(path, "exchanges[0]");
    assert_eq!(kind, ValidationErrorKind::WrongType { expected: "object" });
}

// ─── Exchange fields ───────────────────────────────────────────────────

#[test]
fn test_empty_name() {
    let (path, kind) = rejected(&with_field("exchange", json!("")));
    assert_eq!(path, "exchanges[0].exchange");
    assert_eq!(kind, ValidationErrorKind::EmptyName);
}

#[test]
fn test_venue_type_is_case_sensitive() {
    let (path, kind) = rejected(&with_field("type", json!("cex")));
    assert_eq!(path, "exchanges[0].type");
    assert_eq!(kind, ValidationErrorKind::UnknownVenueType("cex".to_string()));
}

#[test]
fn test_unknown_product() {
    let (path, kind) = rejected(&with_field("product", json!("futures")));
    assert_eq!(path, "exchanges[0].product");
    assert_eq!(kind, ValidationErrorKind::UnknownProduct("futures".to_string()));
}

#[test]
fn test_missing_product() {
    let mut exchange = sample_exchange_json();
    exchange.as_object_mut().unwrap().remove("product");
    let (path, kind) = rejected(&dataset_with(exchange));
    assert_eq!(path, "exchanges[0].product");
    assert_eq!(kind, ValidationErrorKind::MissingField);
}

#[test]
fn test_day_basis_must_be_positive_integer() {
    let (path, kind) = rejected(&with_field("day_basis", json!(7.5)));
    assert_eq!(path, "exchanges[0].day_basis");
    assert_eq!(kind, ValidationErrorKind::NonIntegerDayBasis(7.5));

    let (_, kind) = rejected(&with_field("day_basis", json!(0)));
    assert_eq!(kind, ValidationErrorKind::NonPositiveDayBasis(0.0));

    let (_, kind) = rejected(&with_field("day_basis", json!(-7)));
    assert_eq!(kind, ValidationErrorKind::NonPositiveDayBasis(-7.0));

    let (_, kind) = rejected(&with_field("day_basis", json!("7")));
    assert_eq!(kind, ValidationErrorKind::WrongType { expected: "integer" });
}

#[test]
fn test_day_basis_out_of_range() {
    let (_, kind) = rejected(&with_field("day_basis", json!(5_000_000_000u64)));
    assert_eq!(kind, ValidationErrorKind::DayBasisOutOfRange(5_000_000_000.0));
}

// ─── Schedules ─────────────────────────────────────────────────────────

#[test]
fn test_empty_schedule() {
    let (path, kind) = rejected(&with_field("maker_fees", json!([])));
    assert_eq!(path, "exchanges[0].maker_fees");
    assert_eq!(kind, ValidationErrorKind::EmptySchedule);
}

#[test]
fn test_negative_volume_names_the_tier() {
    let raw = with_field(
        "taker_fees",
        json!([{ "volume": 0, "fee": 5 }, { "volume": -1, "fee": 4 }]),
    );
    let (path, kind) = rejected(&raw);
    assert_eq!(path, "exchanges[0].taker_fees[1].volume");
    assert_eq!(kind, ValidationErrorKind::NegativeVolume(-1.0));
}

#[test]
fn test_unsorted_schedule_is_rejected() {
    let raw = with_field(
        "maker_fees",
        json!([
            { "volume": 0, "fee": 2 },
            { "volume": 25, "fee": 1.5 },
            { "volume": 5, "fee": 1 }
        ]),
    );
    let (path, kind) = rejected(&raw);
    assert_eq!(path, "exchanges[0].maker_fees[2].volume");
    assert_eq!(
        kind,
        ValidationErrorKind::UnsortedSchedule {
            previous: 25.0,
            volume: 5.0
        }
    );
}

#[test]
fn test_fee_must_be_number() {
    let raw = with_field("maker_fees", json!([{ "volume": 0, "fee": "2bps" }]));
    let (path, kind) = rejected(&raw);
    assert_eq!(path, "exchanges[0].maker_fees[0].fee");
    assert_eq!(kind, ValidationErrorKind::WrongType { expected: "number" });
}

#[test]
fn test_tier_missing_volume() {
    let raw = with_field("maker_fees", json!([{ "fee": 2 }]));
    let (path, kind) = rejected(&raw);
    assert_eq!(path, "exchanges[0].maker_fees[0].volume");
    assert_eq!(kind, ValidationErrorKind::MissingField);
}

/// The first defect wins: a later bad exchange is never reached.
#[test]
fn test_first_defect_is_reported() {
    let mut raw = sample_dataset_json();
    raw["exchanges"][1]["type"] = json!("CeFi");
    raw["exchanges"][2]["product"] = json!("options");
    let (path, _) = rejected(&raw);
    assert_eq!(path, "exchanges[1].type");
}

// ─── Entry points ──────────────────────────────────────────────────────

#[test]
fn test_single_exchange_paths_are_relative() {
    let mut exchange = sample_exchange_json();
    exchange["product"] = json!(42);
    let err = validate_exchange(&exchange).unwrap_err();
    assert_eq!(err.path, "product");
    assert_eq!(err.kind, ValidationErrorKind::WrongType { expected: "string" });
}

#[test]
fn test_error_display_names_path_and_reason() {
    let err = validate_dataset(&with_field("type", json!("cex"))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid dataset at `exchanges[0].type`: unknown venue type `cex`, expected one of CEX, DEX, Nado"
    );
}

#[test]
fn test_serde_deserialize_routes_through_validation() {
    let dataset: Dataset = serde_json::from_value(sample_dataset_json()).unwrap();
    assert_eq!(dataset.len(), 3);

    let err = serde_json::from_value::<Dataset>(json!({ "exchanges": [] })).unwrap_err();
    assert!(err.to_string().contains("`exchanges`"), "got: {err}");
}

#[test]
fn test_typed_dataset_must_not_be_empty() {
    let err = Dataset::new(Vec::new()).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::EmptyDataset);
}

#[test]
fn test_schedule_constructor_rejects_non_finite_fee() {
    let err = FeeSchedule::new(vec![FeePoint::new(0.0, 1.0), FeePoint::new(5.0, f64::NAN)])
        .unwrap_err();
    assert_eq!(err, ScheduleError::NonFiniteFee { index: 1 });
}

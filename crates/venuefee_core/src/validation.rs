//! Structural validation of raw dataset documents.
//!
//! Accepts any JSON value and either produces a typed [`Dataset`] or fails
//! closed with a single [`ValidationError`] naming the first defect and its
//! field path (`exchanges[2].maker_fees[0].volume`). Nothing is repaired:
//! unknown keys are ignored, everything else must already be well-formed.

use std::num::NonZeroU32;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Dataset, Exchange, FeePoint, FeeSchedule, Product, ScheduleError, VenueType};

/// Rejected document: where and why.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid dataset at `{path}`: {kind}")]
pub struct ValidationError {
    /// Dotted field path, `(root)` for the document itself.
    pub path: String,
    pub kind: ValidationErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationErrorKind {
    #[error("missing required field")]
    MissingField,
    #[error("expected {expected}")]
    WrongType { expected: &'static str },
    #[error("name must not be empty")]
    EmptyName,
    #[error("unknown venue type `{0}`, expected one of CEX, DEX, Nado")]
    UnknownVenueType(String),
    #[error("unknown product `{0}`, expected perp or spot")]
    UnknownProduct(String),
    #[error("day basis must be an integer, got {0}")]
    NonIntegerDayBasis(f64),
    #[error("day basis must be positive, got {0}")]
    NonPositiveDayBasis(f64),
    #[error("day basis {0} does not fit in 32 bits")]
    DayBasisOutOfRange(f64),
    #[error("schedule must contain at least one tier")]
    EmptySchedule,
    #[error("volume must be >= 0, got {0}")]
    NegativeVolume(f64),
    #[error("value is not a finite number")]
    NonFiniteNumber,
    #[error("volume {volume} is below the previous threshold {previous}")]
    UnsortedSchedule { previous: f64, volume: f64 },
    #[error("dataset must contain at least one exchange")]
    EmptyDataset,
}

#[derive(Debug, Clone, Default)]
struct FieldPath(String);

impl FieldPath {
    fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    fn error(&self, kind: ValidationErrorKind) -> ValidationError {
        let path = if self.0.is_empty() {
            "(root)".to_string()
        } else {
            self.0.clone()
        };
        ValidationError { path, kind }
    }
}

/// Validate a raw document into a [`Dataset`].
pub fn validate_dataset(raw: &Value) -> Result<Dataset, ValidationError> {
    let result = parse_dataset(raw);
    if let Err(err) = &result {
        tracing::debug!(path = %err.path, reason = %err.kind, "dataset rejected");
    }
    result
}

/// Validate a single raw exchange entry (paths are relative to the entry).
pub fn validate_exchange(raw: &Value) -> Result<Exchange, ValidationError> {
    parse_exchange(raw, &FieldPath::default())
}

fn parse_dataset(raw: &Value) -> Result<Dataset, ValidationError> {
    let root = FieldPath::default();
    let object = as_object(raw, &root)?;
    let (value, path) = field(object, &root, "exchanges")?;
    let items = as_array(value, &path)?;
    if items.is_empty() {
        return Err(path.error(ValidationErrorKind::EmptyDataset));
    }

    let exchanges = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_exchange(item, &path.index(index)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::from_validated(exchanges))
}

fn parse_exchange(raw: &Value, at: &FieldPath) -> Result<Exchange, ValidationError> {
    let object = as_object(raw, at)?;

    let (value, path) = field(object, at, "exchange")?;
    let name = as_str(value, &path)?;
    if name.is_empty() {
        return Err(path.error(ValidationErrorKind::EmptyName));
    }

    let (value, path) = field(object, at, "type")?;
    let token = as_str(value, &path)?;
    let venue_type = VenueType::parse(token)
        .ok_or_else(|| path.error(ValidationErrorKind::UnknownVenueType(token.to_string())))?;

    let (value, path) = field(object, at, "product")?;
    let token = as_str(value, &path)?;
    let product = Product::parse(token)
        .ok_or_else(|| path.error(ValidationErrorKind::UnknownProduct(token.to_string())))?;

    let (value, path) = field(object, at, "day_basis")?;
    let day_basis = parse_day_basis(value, &path)?;

    let (value, path) = field(object, at, "maker_fees")?;
    let maker_fees = parse_schedule(value, &path)?;

    let (value, path) = field(object, at, "taker_fees")?;
    let taker_fees = parse_schedule(value, &path)?;

    Ok(Exchange {
        name: name.to_string(),
        venue_type,
        product,
        day_basis,
        maker_fees,
        taker_fees,
    })
}

fn parse_day_basis(raw: &Value, at: &FieldPath) -> Result<NonZeroU32, ValidationError> {
    let Value::Number(number) = raw else {
        return Err(at.error(ValidationErrorKind::WrongType {
            expected: "integer",
        }));
    };

    if let Some(days) = number.as_u64() {
        let days = u32::try_from(days)
            .map_err(|_| at.error(ValidationErrorKind::DayBasisOutOfRange(days as f64)))?;
        return NonZeroU32::new(days)
            .ok_or_else(|| at.error(ValidationErrorKind::NonPositiveDayBasis(0.0)));
    }

    let days = number.as_f64().unwrap_or(f64::NAN);
    if days.fract() != 0.0 {
        return Err(at.error(ValidationErrorKind::NonIntegerDayBasis(days)));
    }
    if days <= 0.0 {
        return Err(at.error(ValidationErrorKind::NonPositiveDayBasis(days)));
    }
    if days > f64::from(u32::MAX) {
        return Err(at.error(ValidationErrorKind::DayBasisOutOfRange(days)));
    }
    NonZeroU32::new(days as u32)
        .ok_or_else(|| at.error(ValidationErrorKind::NonPositiveDayBasis(days)))
}

fn parse_schedule(raw: &Value, at: &FieldPath) -> Result<FeeSchedule, ValidationError> {
    let items = as_array(raw, at)?;
    let mut points = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let tier = at.index(index);
        let object = as_object(item, &tier)?;
        let (value, path) = field(object, &tier, "volume")?;
        let volume = as_number(value, &path)?;
        let (value, path) = field(object, &tier, "fee")?;
        let fee = as_number(value, &path)?;
        points.push(FeePoint::new(volume, fee));
    }

    FeeSchedule::new(points).map_err(|err| schedule_error(at, err))
}

fn schedule_error(at: &FieldPath, err: ScheduleError) -> ValidationError {
    match err {
        ScheduleError::Empty => at.error(ValidationErrorKind::EmptySchedule),
        ScheduleError::NegativeVolume { index, volume } => at
            .index(index)
            .key("volume")
            .error(ValidationErrorKind::NegativeVolume(volume)),
        ScheduleError::NonFiniteVolume { index } => at
            .index(index)
            .key("volume")
            .error(ValidationErrorKind::NonFiniteNumber),
        ScheduleError::NonFiniteFee { index } => at
            .index(index)
            .key("fee")
            .error(ValidationErrorKind::NonFiniteNumber),
        ScheduleError::Descending {
            index,
            previous,
            volume,
        } => at
            .index(index)
            .key("volume")
            .error(ValidationErrorKind::UnsortedSchedule { previous, volume }),
    }
}

/// Checks on typed exchanges that the types alone do not enforce.
pub(crate) fn check_exchanges(exchanges: &[Exchange]) -> Result<(), ValidationError> {
    let path = FieldPath::default().key("exchanges");
    if exchanges.is_empty() {
        return Err(path.error(ValidationErrorKind::EmptyDataset));
    }
    for (index, exchange) in exchanges.iter().enumerate() {
        let at = path.index(index);
        if exchange.name.is_empty() {
            return Err(at.key("exchange").error(ValidationErrorKind::EmptyName));
        }
    }
    Ok(())
}

fn field<'a>(
    object: &'a Map<String, Value>,
    parent: &FieldPath,
    key: &str,
) -> Result<(&'a Value, FieldPath), ValidationError> {
    let path = parent.key(key);
    match object.get(key) {
        Some(value) => Ok((value, path)),
        None => Err(path.error(ValidationErrorKind::MissingField)),
    }
}

fn as_object<'a>(
    value: &'a Value,
    at: &FieldPath,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| {
        at.error(ValidationErrorKind::WrongType {
            expected: "object",
        })
    })
}

fn as_array<'a>(value: &'a Value, at: &FieldPath) -> Result<&'a Vec<Value>, ValidationError> {
    value
        .as_array()
        .ok_or_else(|| at.error(ValidationErrorKind::WrongType { expected: "array" }))
}

fn as_str<'a>(value: &'a Value, at: &FieldPath) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| {
        at.error(ValidationErrorKind::WrongType {
            expected: "string",
        })
    })
}

fn as_number(value: &Value, at: &FieldPath) -> Result<f64, ValidationError> {
    value.as_f64().ok_or_else(|| {
        at.error(ValidationErrorKind::WrongType {
            expected: "number",
        })
    })
}

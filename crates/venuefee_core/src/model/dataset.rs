//! The full comparison dataset and its pure edit operations.
//!
//! Edits never touch the receiver: each returns a fresh `Dataset`. Persisting
//! the result is the caller's job.

use std::collections::HashMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::model::{Exchange, Product};
use crate::validation::{self, ValidationError};

/// Non-empty, ordered list of exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Dataset {
    exchanges: Vec<Exchange>,
}

impl Dataset {
    /// Build a dataset from already-typed exchanges.
    ///
    /// Applies the same field checks as [`validation::validate_dataset`] that
    /// the type system does not already guarantee: the list and every name
    /// must be non-empty.
    pub fn new(exchanges: Vec<Exchange>) -> Result<Self, ValidationError> {
        validation::check_exchanges(&exchanges)?;
        Ok(Self { exchanges })
    }

    pub(crate) fn from_validated(exchanges: Vec<Exchange>) -> Self {
        Self { exchanges }
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Last exchange named `name`. Later entries win over earlier duplicates.
    pub fn exchange(&self, name: &str) -> Option<&Exchange> {
        self.exchanges.iter().rev().find(|exchange| exchange.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exchanges.iter().any(|exchange| exchange.name == name)
    }

    /// Name index. Duplicate names resolve to the last entry.
    pub fn by_name(&self) -> HashMap<&str, &Exchange> {
        self.exchanges
            .iter()
            .map(|exchange| (exchange.name.as_str(), exchange))
            .collect()
    }

    /// New dataset with every entry named like `updated` replaced by it.
    ///
    /// Returns `None` when no entry carries that name; order is preserved
    /// otherwise.
    pub fn replace_exchange(&self, updated: &Exchange) -> Option<Dataset> {
        if !self.contains(&updated.name) {
            return None;
        }
        let exchanges = self
            .exchanges
            .iter()
            .map(|exchange| {
                if exchange.name == updated.name {
                    updated.clone()
                } else {
                    exchange.clone()
                }
            })
            .collect();
        Some(Dataset { exchanges })
    }

    /// Exchanges trading `product`, each rescaled to `target_day_basis`.
    pub fn normalized(&self, product: Product, target_day_basis: NonZeroU32) -> Vec<Exchange> {
        self.exchanges
            .iter()
            .filter(|exchange| exchange.product == product)
            .map(|exchange| exchange.normalized(target_day_basis))
            .collect()
    }

    pub fn into_exchanges(self) -> Vec<Exchange> {
        self.exchanges
    }
}

impl TryFrom<serde_json::Value> for Dataset {
    type Error = ValidationError;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        validation::validate_dataset(&raw)
    }
}

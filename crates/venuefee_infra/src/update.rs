//! Transport-agnostic handler for dataset replacement requests.
//!
//! Takes the raw request body, returns a status code and JSON body. Any
//! failure (malformed JSON, validation, write) maps to the same 500 response;
//! the detail goes to the log, not to the client.

use serde::Serialize;
use serde_json::Value;

use crate::store::DatasetStore;

pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 500;

pub const UPDATE_SUCCESS_MESSAGE: &str = "Dataset updated and persisted to file";
pub const UPDATE_FAILURE_MESSAGE: &str = "Failed to update dataset";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UpdateBody {
    Success { success: bool, message: String },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResponse {
    pub status: u16,
    pub body: UpdateBody,
}

impl UpdateResponse {
    pub fn success() -> Self {
        Self {
            status: STATUS_OK,
            body: UpdateBody::Success {
                success: true,
                message: UPDATE_SUCCESS_MESSAGE.to_string(),
            },
        }
    }

    pub fn failure() -> Self {
        Self {
            status: STATUS_ERROR,
            body: UpdateBody::Failure {
                error: UPDATE_FAILURE_MESSAGE.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Body as a JSON value, ready to write to the wire.
    pub fn body_json(&self) -> Value {
        serde_json::to_value(&self.body).unwrap_or(Value::Null)
    }
}

/// Replace the stored dataset with the document in `body`.
pub fn handle_update_dataset(store: &DatasetStore, body: &[u8]) -> UpdateResponse {
    let raw: Value = match serde_json::from_slice(body) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(error = %err, "update body is not valid JSON");
            return UpdateResponse::failure();
        }
    };

    match store.apply_update(&raw) {
        Ok(outcome) => {
            tracing::debug!(exchanges = outcome.exchanges, "update request applied");
            UpdateResponse::success()
        }
        Err(err) => {
            tracing::error!(error = %err, "error updating dataset");
            UpdateResponse::failure()
        }
    }
}

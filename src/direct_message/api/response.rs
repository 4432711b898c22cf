//! Framework-neutral HTTP responses.

use crate::direct_message::validation::FieldErrors;
use serde::Serialize;
use serde_json::{Value, json};

/// HTTP 200.
pub const STATUS_OK: u16 = 200;
/// HTTP 201.
pub const STATUS_CREATED: u16 = 201;
/// HTTP 400.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// HTTP 500.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// A status code paired with a JSON body, ready for any HTTP framework to
/// write out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON response body.
    pub body: Value,
}

impl ApiResponse {
    /// Builds a response with an arbitrary status and body.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Serializes `payload` with the given success status.
    ///
    /// Falls back to a 500 response if the payload cannot be serialized.
    #[must_use]
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self::new(status, body),
            Err(err) => Self::internal_error("Failed to serialize response", &err),
        }
    }

    /// A 400 response carrying per-field reasons.
    #[must_use]
    pub fn bad_request(message: &str, errors: &FieldErrors) -> Self {
        Self::new(
            STATUS_BAD_REQUEST,
            json!({ "message": message, "errors": errors.reasons() }),
        )
    }

    /// A 500 response reporting `error` opaquely through its display text.
    #[must_use]
    pub fn internal_error(message: &str, error: &dyn std::error::Error) -> Self {
        Self::new(
            STATUS_INTERNAL_ERROR,
            json!({ "message": message, "error": error.to_string() }),
        )
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

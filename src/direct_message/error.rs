//! Error taxonomy for the direct message core.
//!
//! Two families are kept strictly apart: [`ValidationError`] for caller
//! input that fails required-field or format checks, and [`StorageError`]
//! for failures of the persistence layer. Validation failures never reach
//! storage.

use super::domain::MessageId;
use super::validation::FieldErrors;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Caller input failed one or more field checks.
///
/// Carries a sparse per-field description: only failing fields are present,
/// so several fields can be flagged at once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {errors}")]
pub struct ValidationError {
    errors: FieldErrors,
}

impl ValidationError {
    /// Wraps a set of field failures.
    #[must_use]
    pub const fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Returns the per-field failures.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consumes the error and returns the per-field failures.
    #[must_use]
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// Errors raised by message persistence.
///
/// Every variant is safe for the caller to retry; the core performs no
/// retries of its own.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// A message with this identifier already exists.
    #[error("duplicate message: {0}")]
    DuplicateMessage(MessageId),

    /// The database reported an error.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),

    /// A stored row could not be converted to or from the domain model.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The storage backend could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// A storage call did not finish within its deadline.
    #[error("{operation} did not complete within {deadline:?}")]
    DeadlineExceeded {
        /// Name of the store operation that timed out.
        operation: &'static str,
        /// The deadline that elapsed.
        deadline: Duration,
    },
}

impl StorageError {
    /// Creates a database error from any error type.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a deadline error for the named operation.
    #[must_use]
    pub const fn deadline_exceeded(operation: &'static str, deadline: Duration) -> Self {
        Self::DeadlineExceeded {
            operation,
            deadline,
        }
    }
}

impl From<diesel::result::Error> for StorageError {
    fn from(err: diesel::result::Error) -> Self {
        Self::database(err)
    }
}

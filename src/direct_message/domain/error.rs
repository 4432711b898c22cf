//! Error types for direct message domain construction.

use thiserror::Error;

/// Errors returned while constructing direct message domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The user identifier is not a 24-character hexadecimal string.
    #[error("user identifier '{0}' is not a valid object identifier")]
    MalformedUserId(String),

    /// The message text is empty.
    #[error("message text must not be empty")]
    EmptyText,

    /// The message text exceeds the configured character limit.
    #[error("message text has {actual} characters, exceeds limit of {max}")]
    TextTooLong {
        /// The configured maximum number of characters.
        max: usize,
        /// The actual number of characters.
        actual: usize,
    },
}

//! Validated message text payload.

use super::MessageDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty text body of a direct message.
///
/// Only the empty string is rejected. Whitespace is preserved as sent and a
/// whitespace-only body is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageText(String);

impl MessageText {
    /// Creates message text with no length limit.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyText`] when the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, MessageDomainError> {
        Self::with_limit(value, None)
    }

    /// Creates message text, enforcing an optional maximum length in
    /// characters.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyText`] when the value is empty, or
    /// [`MessageDomainError::TextTooLong`] when it exceeds `max_chars`.
    pub fn with_limit(
        value: impl Into<String>,
        max_chars: Option<usize>,
    ) -> Result<Self, MessageDomainError> {
        let text = value.into();
        if text.is_empty() {
            return Err(MessageDomainError::EmptyText);
        }

        if let Some(max) = max_chars {
            let actual = text.chars().count();
            if actual > max {
                return Err(MessageDomainError::TextTooLong { max, actual });
            }
        }

        Ok(Self(text))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = MessageDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageText> for String {
    fn from(value: MessageText) -> Self {
        value.0
    }
}

impl AsRef<str> for MessageText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

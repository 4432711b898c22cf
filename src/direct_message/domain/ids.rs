//! Identifier newtypes for direct messages and the users exchanging them.
//!
//! Message identifiers are owned by the store; user identifiers are foreign
//! references issued by an external identity system and are only checked for
//! syntactic well-formedness.

use super::MessageDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of hexadecimal characters in a well-formed user identifier.
pub const USER_ID_HEX_LENGTH: usize = 24;

/// Unique identifier for a stored direct message.
///
/// Identifiers are time-ordered (`UUIDv7`), so sorting by identifier follows
/// creation order within a single process.
///
/// # Examples
///
/// ```
/// use postbox::direct_message::domain::MessageId;
///
/// let first = MessageId::new();
/// let second = MessageId::new();
/// assert!(first < second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new time-ordered message identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a message identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

/// Note: each call allocates a fresh identifier. Prefer `MessageId::new()`
/// where the intent should be explicit.
impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for MessageId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a user taking part in a conversation.
///
/// The store never checks that the user exists. It only requires the value
/// to be a 24-character hexadecimal object identifier. Input is trimmed and
/// lowercased so that the same user always maps to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parses and validates a user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyUserId`] when the value is empty
    /// after trimming, or [`MessageDomainError::MalformedUserId`] when it is
    /// not exactly 24 hexadecimal characters.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, MessageDomainError> {
        let raw = value.as_ref();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(MessageDomainError::EmptyUserId);
        }

        let well_formed = normalized.len() == USER_ID_HEX_LENGTH
            && normalized.chars().all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            return Err(MessageDomainError::MalformedUserId(raw.to_owned()));
        }

        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = MessageDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! The direct message aggregate root and its creation draft.
//!
//! A message is immutable once stored, apart from its read flag, which only
//! ever moves from unread to read.

use super::{MessageId, MessageText, UserId};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A one-to-one text message between two users.
///
/// # Invariants
///
/// - `id` is assigned at creation and never reused
/// - `sender_id`, `receiver_id`, and `text` are always present and non-empty
/// - `read` transitions only from `false` to `true`
///
/// Self-messages (`sender_id == receiver_id`) are permitted.
///
/// # Examples
///
/// ```
/// use postbox::direct_message::domain::{DirectMessage, DraftMessage, MessageText, UserId};
/// use mockable::DefaultClock;
///
/// let alice = UserId::parse("64b7f0c2a1d3e4f5a6b7c8d9").expect("valid id");
/// let bob = UserId::parse("64b7f0c2a1d3e4f5a6b7c8da").expect("valid id");
/// let text = MessageText::new("hi").expect("valid text");
///
/// let message = DirectMessage::from_draft(DraftMessage::new(alice, bob, text), &DefaultClock);
/// assert!(!message.is_read());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    id: MessageId,
    sender_id: UserId,
    receiver_id: UserId,
    text: MessageText,
    sent_at: DateTime<Utc>,
    read: bool,
}

/// Caller-supplied fields for a message that has not been stored yet.
///
/// `sent_at` and `read` are optional overrides. They are accepted without
/// bounds checks, so a caller may back-date a message or create it already
/// read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftMessage {
    sender_id: UserId,
    receiver_id: UserId,
    text: MessageText,
    sent_at: Option<DateTime<Utc>>,
    read: bool,
}

impl DraftMessage {
    /// Creates a draft with the required fields and default overrides.
    #[must_use]
    pub const fn new(sender_id: UserId, receiver_id: UserId, text: MessageText) -> Self {
        Self {
            sender_id,
            receiver_id,
            text,
            sent_at: None,
            read: false,
        }
    }

    /// Overrides the send timestamp.
    #[must_use]
    pub const fn with_sent_at(mut self, sent_at: DateTime<Utc>) -> Self {
        self.sent_at = Some(sent_at);
        self
    }

    /// Overrides the initial read flag.
    #[must_use]
    pub const fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Returns the sender identifier.
    #[must_use]
    pub const fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    /// Returns the receiver identifier.
    #[must_use]
    pub const fn receiver_id(&self) -> &UserId {
        &self.receiver_id
    }

    /// Returns the message text.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the caller-supplied send timestamp, if any.
    #[must_use]
    pub const fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_at
    }

    /// Returns the initial read flag.
    #[must_use]
    pub const fn read(&self) -> bool {
        self.read
    }
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted sender identifier.
    pub sender_id: UserId,
    /// Persisted receiver identifier.
    pub receiver_id: UserId,
    /// Persisted message text.
    pub text: MessageText,
    /// Persisted send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Persisted read flag.
    pub read: bool,
}

impl DirectMessage {
    /// Creates a message from a draft, assigning a fresh identifier and
    /// defaulting the send time to the clock's current time.
    ///
    /// The send time is truncated to microseconds, the finest precision any
    /// store keeps, so the returned message equals the persisted one.
    #[must_use]
    pub fn from_draft(draft: DraftMessage, clock: &impl Clock) -> Self {
        let DraftMessage {
            sender_id,
            receiver_id,
            text,
            sent_at,
            read,
        } = draft;

        Self {
            id: MessageId::new(),
            sender_id,
            receiver_id,
            text,
            sent_at: sent_at.unwrap_or_else(|| clock.utc()).trunc_subsecs(6),
            read,
        }
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            sender_id: data.sender_id,
            receiver_id: data.receiver_id,
            text: data.text,
            sent_at: data.sent_at,
            read: data.read,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sender identifier.
    #[must_use]
    pub const fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    /// Returns the receiver identifier.
    #[must_use]
    pub const fn receiver_id(&self) -> &UserId {
        &self.receiver_id
    }

    /// Returns the message text.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the send timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns `true` once the receiver has acknowledged the message.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns `true` when the message was exchanged between `a` and `b`,
    /// in either direction.
    #[must_use]
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (self.sender_id == *a && self.receiver_id == *b)
            || (self.sender_id == *b && self.receiver_id == *a)
    }

    /// Returns `true` when the message was sent by `sender_id` to
    /// `receiver_id` and is still unread.
    #[must_use]
    pub fn is_unread_from(&self, sender_id: &UserId, receiver_id: &UserId) -> bool {
        !self.read && self.sender_id == *sender_id && self.receiver_id == *receiver_id
    }

    /// Marks the message as read.
    ///
    /// Returns `true` when the flag changed and `false` when the message was
    /// already read. The flag is never cleared.
    pub const fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }
}

//! Request payloads accepted at the HTTP boundary.
//!
//! Every field is optional so that missing values surface as field-level
//! validation failures rather than deserialization errors.

use crate::direct_message::services::AppendMessageRequest;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// JSON body for creating a message.
///
/// Older clients send `time` and `isRead`; both are accepted as aliases.
///
/// # Examples
///
/// ```
/// use postbox::direct_message::api::CreateMessageRequest;
///
/// let request: CreateMessageRequest = serde_json::from_str(
///     r#"{"senderId":"64b7f0c2a1d3e4f5a6b7c8d9","text":"hi","isRead":true}"#,
/// )
/// .expect("valid json");
/// assert!(request.receiver_id.is_none());
/// assert_eq!(request.read, Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    /// Author of the message.
    pub sender_id: Option<String>,
    /// Addressee of the message.
    pub receiver_id: Option<String>,
    /// Message body.
    pub text: Option<String>,
    /// Optional send time override.
    #[serde(default, alias = "time")]
    pub sent_at: Option<DateTime<Utc>>,
    /// Optional initial read flag.
    #[serde(default, alias = "isRead")]
    pub read: Option<bool>,
}

impl From<CreateMessageRequest> for AppendMessageRequest {
    fn from(request: CreateMessageRequest) -> Self {
        let CreateMessageRequest {
            sender_id,
            receiver_id,
            text,
            sent_at,
            read,
        } = request;

        let mut append = Self::new(
            sender_id.unwrap_or_default(),
            receiver_id.unwrap_or_default(),
            text.unwrap_or_default(),
        );
        if let Some(timestamp) = sent_at {
            append = append.with_sent_at(timestamp);
        }
        if let Some(flag) = read {
            append = append.with_read(flag);
        }
        append
    }
}

/// Query parameters naming the two sides of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationParams {
    /// One participant.
    pub sender_id: Option<String>,
    /// The other participant.
    pub receiver_id: Option<String>,
}

/// JSON body for acknowledging one sender's messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    /// The user whose messages are acknowledged.
    pub sender_id: Option<String>,
    /// The user acknowledging them.
    pub receiver_id: Option<String>,
}

//! Pure validation rules for incoming requests.
//!
//! Each rule inspects raw caller-supplied values, records every failing
//! field, and only on full success yields a typed command. Nothing here
//! touches storage.

use super::{Field, FieldErrors, FieldIssue, ValidationConfig};
use crate::direct_message::{
    domain::{DraftMessage, MessageDomainError, MessageText, UserId},
    error::ValidationError,
};

/// A validated request for the conversation between two users.
///
/// The pair is unordered for matching purposes; `participant` and
/// `counterpart` only record how the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationQuery {
    /// The first user, supplied as `senderId`.
    pub participant: UserId,
    /// The second user, supplied as `receiverId`.
    pub counterpart: UserId,
}

/// A validated request to acknowledge one sender's messages to one
/// receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkReadCommand {
    /// The user whose messages are being acknowledged.
    pub sender_id: UserId,
    /// The user acknowledging them.
    pub receiver_id: UserId,
}

/// Parses a raw identifier, recording a failure for `field` on error.
///
/// Absent and empty values are reported as [`FieldIssue::Missing`]; values
/// that are present but not well-formed as [`FieldIssue::Malformed`].
pub fn parse_user_id(field: Field, raw: Option<&str>, errors: &mut FieldErrors) -> Option<UserId> {
    let Some(value) = raw else {
        errors.insert(field, FieldIssue::Missing);
        return None;
    };

    match UserId::parse(value) {
        Ok(id) => Some(id),
        Err(MessageDomainError::EmptyUserId) => {
            errors.insert(field, FieldIssue::Missing);
            None
        }
        Err(_) => {
            errors.insert(field, FieldIssue::Malformed);
            None
        }
    }
}

/// Parses raw message text, recording a failure on error.
pub fn parse_text(
    raw: Option<&str>,
    config: &ValidationConfig,
    errors: &mut FieldErrors,
) -> Option<MessageText> {
    let Some(value) = raw else {
        errors.insert(Field::Text, FieldIssue::Missing);
        return None;
    };

    match MessageText::with_limit(value, config.max_text_length) {
        Ok(text) => Some(text),
        Err(MessageDomainError::TextTooLong { max, .. }) => {
            errors.insert(Field::Text, FieldIssue::TooLong { max });
            None
        }
        Err(_) => {
            errors.insert(Field::Text, FieldIssue::Missing);
            None
        }
    }
}

/// Validates the required fields of a new message.
///
/// The returned draft carries default overrides; callers apply any
/// `sent_at` or `read` values afterwards, since those are not validated.
///
/// # Errors
///
/// Returns [`ValidationError`] flagging every missing or malformed field.
///
/// # Examples
///
/// ```
/// use postbox::direct_message::validation::{Field, ValidationConfig, validate_new_message};
///
/// let err = validate_new_message(None, Some("64b7f0c2a1d3e4f5a6b7c8d9"), Some(""), &ValidationConfig::default())
///     .expect_err("sender and text are missing");
/// assert!(err.errors().contains(Field::SenderId));
/// assert!(err.errors().contains(Field::Text));
/// assert!(!err.errors().contains(Field::ReceiverId));
/// ```
pub fn validate_new_message(
    sender_id: Option<&str>,
    receiver_id: Option<&str>,
    text: Option<&str>,
    config: &ValidationConfig,
) -> Result<DraftMessage, ValidationError> {
    let mut errors = FieldErrors::new();
    let sender = parse_user_id(Field::SenderId, sender_id, &mut errors);
    let receiver = parse_user_id(Field::ReceiverId, receiver_id, &mut errors);
    let body = parse_text(text, config, &mut errors);

    match (sender, receiver, body) {
        (Some(sender), Some(receiver), Some(body)) if errors.is_empty() => {
            Ok(DraftMessage::new(sender, receiver, body))
        }
        _ => Err(ValidationError::new(errors)),
    }
}

/// Validates a conversation query between two users.
///
/// # Errors
///
/// Returns [`ValidationError`] flagging each missing or malformed
/// identifier.
pub fn validate_conversation_query(
    sender_id: Option<&str>,
    receiver_id: Option<&str>,
) -> Result<ConversationQuery, ValidationError> {
    let (participant, counterpart) = validate_pair(sender_id, receiver_id)?;
    Ok(ConversationQuery {
        participant,
        counterpart,
    })
}

/// Validates a mark-read request.
///
/// # Errors
///
/// Returns [`ValidationError`] flagging each missing or malformed
/// identifier.
pub fn validate_mark_read(
    sender_id: Option<&str>,
    receiver_id: Option<&str>,
) -> Result<MarkReadCommand, ValidationError> {
    let (sender, receiver) = validate_pair(sender_id, receiver_id)?;
    Ok(MarkReadCommand {
        sender_id: sender,
        receiver_id: receiver,
    })
}

/// Validates the recipient of an unread-count query.
///
/// # Errors
///
/// Returns [`ValidationError`] flagging [`Field::UserId`] when the
/// identifier is missing or malformed.
pub fn validate_unread_query(user_id: Option<&str>) -> Result<UserId, ValidationError> {
    let mut errors = FieldErrors::new();
    parse_user_id(Field::UserId, user_id, &mut errors).ok_or_else(|| ValidationError::new(errors))
}

fn validate_pair(
    sender_id: Option<&str>,
    receiver_id: Option<&str>,
) -> Result<(UserId, UserId), ValidationError> {
    let mut errors = FieldErrors::new();
    let sender = parse_user_id(Field::SenderId, sender_id, &mut errors);
    let receiver = parse_user_id(Field::ReceiverId, receiver_id, &mut errors);

    match (sender, receiver) {
        (Some(sender), Some(receiver)) => Ok((sender, receiver)),
        _ => Err(ValidationError::new(errors)),
    }
}

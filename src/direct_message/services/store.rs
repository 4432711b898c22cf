//! Service layer for storing and querying direct messages.
//!
//! Provides [`MessageStoreService`], which validates raw request fields,
//! assigns store-owned defaults, and delegates to a [`MessageRepository`]
//! under a per-call deadline.

use super::deadline::{DEFAULT_OPERATION_DEADLINE, within_deadline};
use crate::direct_message::{
    domain::DirectMessage,
    error::{StorageError, ValidationError},
    ports::MessageRepository,
    validation::{
        MarkReadCommand, ValidationConfig, validate_conversation_query, validate_mark_read,
        validate_new_message,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Request payload for appending a new message.
///
/// Empty identifier or text fields count as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendMessageRequest {
    sender_id: String,
    receiver_id: String,
    text: String,
    sent_at: Option<DateTime<Utc>>,
    read: Option<bool>,
}

impl AppendMessageRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            text: text.into(),
            sent_at: None,
            read: None,
        }
    }

    /// Overrides the send timestamp instead of using the store clock.
    #[must_use]
    pub const fn with_sent_at(mut self, sent_at: DateTime<Utc>) -> Self {
        self.sent_at = Some(sent_at);
        self
    }

    /// Overrides the initial read flag.
    #[must_use]
    pub const fn with_read(mut self, read: bool) -> Self {
        self.read = Some(read);
        self
    }
}

/// Service-level errors for message operations.
#[derive(Debug, Clone, Error)]
pub enum MessageServiceError {
    /// Caller input failed validation. Storage was not touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The storage layer failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MessageServiceError {
    /// Returns `true` when the caller may retry the same request.
    ///
    /// Storage failures are retryable; validation failures are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type for message service operations.
pub type MessageServiceResult<T> = Result<T, MessageServiceError>;

/// Message store orchestration service.
#[derive(Clone)]
pub struct MessageStoreService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    operation_deadline: Duration,
    validation: ValidationConfig,
}

impl<R, C> MessageStoreService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default deadline and validation limits.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            operation_deadline: DEFAULT_OPERATION_DEADLINE,
            validation: ValidationConfig::default(),
        }
    }

    /// Sets the deadline applied to each storage call.
    #[must_use]
    pub const fn with_operation_deadline(mut self, deadline: Duration) -> Self {
        self.operation_deadline = deadline;
        self
    }

    /// Sets the validation limits applied to new messages.
    #[must_use]
    pub const fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// Returns the underlying repository handle.
    #[must_use]
    pub const fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Returns every stored message in insertion order.
    ///
    /// Insertion order is best effort: it reflects when records reached the
    /// store, not any causal relation between them.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Storage`] when the query fails.
    pub async fn list_all(&self) -> MessageServiceResult<Vec<DirectMessage>> {
        tracing::debug!("listing all messages");
        let messages = within_deadline(
            "list_all",
            self.operation_deadline,
            self.repository.list_all(),
        )
        .await?;
        Ok(messages)
    }

    /// Validates and persists a new message.
    ///
    /// The store assigns the identifier, defaults `sent_at` to the clock's
    /// current time, and defaults `read` to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Validation`] flagging every missing
    /// field (nothing is persisted), or [`MessageServiceError::Storage`]
    /// when persistence fails.
    pub async fn append(
        &self,
        request: AppendMessageRequest,
    ) -> MessageServiceResult<DirectMessage> {
        let AppendMessageRequest {
            sender_id,
            receiver_id,
            text,
            sent_at,
            read,
        } = request;

        let mut draft = validate_new_message(
            Some(&sender_id),
            Some(&receiver_id),
            Some(&text),
            &self.validation,
        )
        .inspect_err(|err| tracing::warn!(error = %err, "rejected append request"))?;
        if let Some(timestamp) = sent_at {
            draft = draft.with_sent_at(timestamp);
        }
        if let Some(flag) = read {
            draft = draft.with_read(flag);
        }

        let message = DirectMessage::from_draft(draft, &*self.clock);
        within_deadline(
            "append",
            self.operation_deadline,
            self.repository.append(&message),
        )
        .await?;

        tracing::info!(
            message_id = %message.id(),
            sender_id = %message.sender_id(),
            receiver_id = %message.receiver_id(),
            "message appended"
        );
        Ok(message)
    }

    /// Returns the conversation between two users, in either direction,
    /// ordered by send time ascending.
    ///
    /// Argument order does not matter. Messages with equal send times keep
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Validation`] when either identifier is
    /// missing or malformed, or [`MessageServiceError::Storage`] when the
    /// query fails.
    pub async fn conversation_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> MessageServiceResult<Vec<DirectMessage>> {
        let query = validate_conversation_query(Some(user_a), Some(user_b))
            .inspect_err(|err| tracing::warn!(error = %err, "rejected conversation query"))?;

        tracing::debug!(
            participant = %query.participant,
            counterpart = %query.counterpart,
            "fetching conversation"
        );
        let messages = within_deadline(
            "conversation_between",
            self.operation_deadline,
            self.repository
                .conversation_between(&query.participant, &query.counterpart),
        )
        .await?;
        Ok(messages)
    }

    /// Marks every unread message sent by `sender_id` to `receiver_id` as
    /// read, returning how many messages changed.
    ///
    /// Only that direction is affected. Calling again with nothing new to
    /// acknowledge succeeds and returns zero.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Validation`] when either identifier is
    /// missing or malformed, or [`MessageServiceError::Storage`] when the
    /// update fails.
    pub async fn mark_read(&self, sender_id: &str, receiver_id: &str) -> MessageServiceResult<u64> {
        let MarkReadCommand {
            sender_id: sender,
            receiver_id: receiver,
        } = validate_mark_read(Some(sender_id), Some(receiver_id))
            .inspect_err(|err| tracing::warn!(error = %err, "rejected mark-read request"))?;

        let updated = within_deadline(
            "mark_read",
            self.operation_deadline,
            self.repository.mark_read(&sender, &receiver),
        )
        .await?;

        tracing::info!(
            sender_id = %sender,
            receiver_id = %receiver,
            updated,
            "messages marked as read"
        );
        Ok(updated)
    }
}

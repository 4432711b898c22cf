//! Request handlers mapping service outcomes to HTTP responses.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`MessageApi::list_messages`] |
//! | `POST /` | [`MessageApi::create_message`] |
//! | `GET /between-users` | [`MessageApi::conversation`] |
//! | `POST /mark-read` | [`MessageApi::mark_read`] |
//! | `GET /unread/{userId}` | [`MessageApi::unread_counts`] |

use super::requests::{ConversationParams, CreateMessageRequest, MarkReadRequest};
use super::response::{ApiResponse, STATUS_CREATED, STATUS_OK};
use crate::config::StoreConfig;
use crate::direct_message::{
    domain::UnreadCounts,
    ports::MessageRepository,
    services::{MessageServiceError, MessageStoreService, UnreadAggregator},
};
use mockable::Clock;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

const VALIDATION_FAILED: &str = "Validation failed";
const PAIR_REQUIRED: &str = "Both sender and receiver IDs are required";
const USER_ID_REQUIRED: &str = "Valid user ID is required";
const FETCH_FAILED: &str = "Error fetching messages";
const SAVE_FAILED: &str = "Failed to save message";
const MARK_READ_FAILED: &str = "Failed to mark messages as read";
const UNREAD_FAILED: &str = "Error getting unread counts";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UnreadCountsBody<'a> {
    unread_counts: &'a UnreadCounts,
}

/// HTTP-facing entry point for the direct message core.
pub struct MessageApi<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    store: MessageStoreService<R, C>,
    unread: UnreadAggregator<R>,
}

impl<R, C> MessageApi<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Creates handlers over a repository with default limits.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            store: MessageStoreService::new(Arc::clone(&repository), clock),
            unread: UnreadAggregator::new(repository),
        }
    }

    /// Creates handlers applying the deadline and validation limits from
    /// `config`.
    #[must_use]
    pub fn from_config(repository: Arc<R>, clock: Arc<C>, config: &StoreConfig) -> Self {
        Self {
            store: MessageStoreService::new(Arc::clone(&repository), clock)
                .with_operation_deadline(config.operation_deadline)
                .with_validation(config.validation),
            unread: UnreadAggregator::new(repository)
                .with_operation_deadline(config.operation_deadline),
        }
    }

    /// `GET /`: every stored message.
    pub async fn list_messages(&self) -> ApiResponse {
        match self.store.list_all().await {
            Ok(messages) => ApiResponse::json(STATUS_OK, &messages),
            Err(err) => failure(&err, VALIDATION_FAILED, FETCH_FAILED),
        }
    }

    /// `POST /`: creates a message, answering 201 with the stored record.
    pub async fn create_message(&self, request: CreateMessageRequest) -> ApiResponse {
        match self.store.append(request.into()).await {
            Ok(message) => ApiResponse::json(STATUS_CREATED, &message),
            Err(err) => failure(&err, VALIDATION_FAILED, SAVE_FAILED),
        }
    }

    /// `GET /between-users`: the conversation between two users, oldest
    /// first.
    pub async fn conversation(&self, params: ConversationParams) -> ApiResponse {
        let sender = params.sender_id.unwrap_or_default();
        let receiver = params.receiver_id.unwrap_or_default();
        match self.store.conversation_between(&sender, &receiver).await {
            Ok(messages) => ApiResponse::json(STATUS_OK, &messages),
            Err(err) => failure(&err, VALIDATION_FAILED, FETCH_FAILED),
        }
    }

    /// `POST /mark-read`: acknowledges every unread message from the sender
    /// to the receiver.
    pub async fn mark_read(&self, request: MarkReadRequest) -> ApiResponse {
        let sender = request.sender_id.unwrap_or_default();
        let receiver = request.receiver_id.unwrap_or_default();
        match self.store.mark_read(&sender, &receiver).await {
            Ok(updated) => ApiResponse::new(
                STATUS_OK,
                json!({ "message": "Messages marked as read", "updatedCount": updated }),
            ),
            Err(err) => failure(&err, PAIR_REQUIRED, MARK_READ_FAILED),
        }
    }

    /// `GET /unread/{userId}`: unread counts per sender for the user.
    pub async fn unread_counts(&self, user_id: Option<&str>) -> ApiResponse {
        match self
            .unread
            .unread_counts_for(user_id.unwrap_or_default())
            .await
        {
            Ok(counts) => ApiResponse::json(
                STATUS_OK,
                &UnreadCountsBody {
                    unread_counts: &counts,
                },
            ),
            Err(err) => failure(&err, USER_ID_REQUIRED, UNREAD_FAILED),
        }
    }
}

fn failure(err: &MessageServiceError, invalid: &str, storage: &str) -> ApiResponse {
    match err {
        MessageServiceError::Validation(validation) => {
            ApiResponse::bad_request(invalid, validation.errors())
        }
        MessageServiceError::Storage(storage_err) => {
            ApiResponse::internal_error(storage, storage_err)
        }
    }
}

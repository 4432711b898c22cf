//! Per-sender unread tallies for a receiver.

use super::deadline::{DEFAULT_OPERATION_DEADLINE, within_deadline};
use super::store::MessageServiceResult;
use crate::direct_message::{
    domain::UnreadCounts, ports::MessageRepository, validation::validate_unread_query,
};
use std::sync::Arc;
use std::time::Duration;

/// Computes how many unread messages each sender has pending for a
/// receiver.
///
/// Delegates the grouping to the repository so the tally reflects one
/// consistent view of storage.
#[derive(Clone)]
pub struct UnreadAggregator<R>
where
    R: MessageRepository,
{
    repository: Arc<R>,
    operation_deadline: Duration,
}

impl<R> UnreadAggregator<R>
where
    R: MessageRepository,
{
    /// Creates an aggregator with the default deadline.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            operation_deadline: DEFAULT_OPERATION_DEADLINE,
        }
    }

    /// Sets the deadline applied to each storage call.
    #[must_use]
    pub const fn with_operation_deadline(mut self, deadline: Duration) -> Self {
        self.operation_deadline = deadline;
        self
    }

    /// Returns the unread count per sender for messages addressed to
    /// `receiver_id`.
    ///
    /// Senders with nothing unread are absent from the result, so a
    /// receiver with no unread messages gets an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Validation`] when the identifier is
    /// missing or malformed, or [`MessageServiceError::Storage`] when the
    /// query fails.
    ///
    /// [`MessageServiceError::Validation`]: super::MessageServiceError::Validation
    /// [`MessageServiceError::Storage`]: super::MessageServiceError::Storage
    pub async fn unread_counts_for(&self, receiver_id: &str) -> MessageServiceResult<UnreadCounts> {
        let receiver = validate_unread_query(Some(receiver_id))
            .inspect_err(|err| tracing::warn!(error = %err, "rejected unread-count query"))?;

        tracing::debug!(receiver_id = %receiver, "aggregating unread counts");
        let counts = within_deadline(
            "unread_counts_for",
            self.operation_deadline,
            self.repository.unread_counts_for(&receiver),
        )
        .await?;
        Ok(counts)
    }
}

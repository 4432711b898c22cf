//! Repository port for direct message persistence.
//!
//! Defines the storage contract shared by the message store and the unread
//! aggregator. Both read and write through the same record set, so every
//! implementation is a single source of truth.

use crate::direct_message::{
    domain::{DirectMessage, UnreadCounts, UserId},
    error::StorageError,
};
use async_trait::async_trait;

/// Result type for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Port for direct message persistence.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Message identifiers are unique across the store
/// - Only the read flag of a stored message ever changes, and only from
///   unread to read
/// - [`MessageRepository::mark_read`] applies as one conditional bulk update,
///   so concurrent calls never double-count a transition
/// - Concurrent access is handled internally; no locks are exposed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persists a new message.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DuplicateMessage`] when the identifier is
    /// already stored, or another [`StorageError`] when persistence fails.
    async fn append(&self, message: &DirectMessage) -> StorageResult<()>;

    /// Returns every stored message in insertion order.
    ///
    /// Insertion order is best effort and carries no causal meaning.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails.
    async fn list_all(&self) -> StorageResult<Vec<DirectMessage>>;

    /// Returns all messages exchanged between `a` and `b`, in either
    /// direction, ordered by send time ascending.
    ///
    /// Messages with equal send times are ordered by identifier, which
    /// follows creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails.
    async fn conversation_between(&self, a: &UserId, b: &UserId)
    -> StorageResult<Vec<DirectMessage>>;

    /// Marks every unread message sent by `sender_id` to `receiver_id` as
    /// read and returns how many messages changed.
    ///
    /// Messages in the reverse direction are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the update fails.
    async fn mark_read(&self, sender_id: &UserId, receiver_id: &UserId) -> StorageResult<u64>;

    /// Counts unread messages addressed to `receiver_id`, grouped by sender.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the query fails.
    async fn unread_counts_for(&self, receiver_id: &UserId) -> StorageResult<UnreadCounts>;
}

//! In-memory implementation of the `MessageRepository` port.
//!
//! Thread-safe via an internal [`RwLock`]. Records are kept in insertion
//! order; a side index guards identifier uniqueness. Suitable for tests and
//! single-process deployments without durability requirements.

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::direct_message::{
    domain::{DirectMessage, MessageId, UnreadCounts, UserId},
    error::StorageError,
    ports::repository::{MessageRepository, StorageResult},
};

/// In-memory implementation of [`MessageRepository`].
///
/// # Example
///
/// ```
/// use postbox::direct_message::adapters::memory::InMemoryMessageRepository;
///
/// let repo = InMemoryMessageRepository::new();
/// assert!(repo.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    state: Arc<RwLock<InMemoryMessageState>>,
}

#[derive(Debug, Default)]
struct InMemoryMessageState {
    messages: Vec<DirectMessage>,
    ids: HashSet<MessageId>,
}

impl InMemoryMessageRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned. Use the repository trait
    /// methods for error-propagating access.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .map(|guard| guard.messages.len())
            .unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_state(&self) -> StorageResult<RwLockReadGuard<'_, InMemoryMessageState>> {
        self.state
            .read()
            .map_err(|e| StorageError::connection(format!("lock poisoned: {e}")))
    }

    fn write_state(&self) -> StorageResult<RwLockWriteGuard<'_, InMemoryMessageState>> {
        self.state
            .write()
            .map_err(|e| StorageError::connection(format!("lock poisoned: {e}")))
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: &DirectMessage) -> StorageResult<()> {
        let mut state = self.write_state()?;

        if !state.ids.insert(message.id()) {
            return Err(StorageError::DuplicateMessage(message.id()));
        }

        state.messages.push(message.clone());
        Ok(())
    }

    async fn list_all(&self) -> StorageResult<Vec<DirectMessage>> {
        let state = self.read_state()?;
        Ok(state.messages.clone())
    }

    async fn conversation_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> StorageResult<Vec<DirectMessage>> {
        let state = self.read_state()?;

        let mut conversation: Vec<DirectMessage> = state
            .messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect();
        drop(state);

        conversation.sort_by_key(|m| (m.sent_at(), m.id()));
        Ok(conversation)
    }

    async fn mark_read(&self, sender_id: &UserId, receiver_id: &UserId) -> StorageResult<u64> {
        let mut state = self.write_state()?;

        let updated = state
            .messages
            .iter_mut()
            .filter(|m| m.is_unread_from(sender_id, receiver_id))
            .fold(0_u64, |count, m| {
                if m.mark_read() {
                    count.saturating_add(1)
                } else {
                    count
                }
            });

        Ok(updated)
    }

    async fn unread_counts_for(&self, receiver_id: &UserId) -> StorageResult<UnreadCounts> {
        let state = self.read_state()?;

        let counts = UnreadCounts::from_senders(
            state
                .messages
                .iter()
                .filter(|m| !m.is_read() && m.receiver_id() == receiver_id)
                .map(DirectMessage::sender_id),
        );
        Ok(counts)
    }
}

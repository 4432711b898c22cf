//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::DefaultClock;
use postbox::direct_message::{
    adapters::memory::InMemoryMessageRepository,
    domain::DirectMessage,
    services::{AppendMessageRequest, MessageStoreService, UnreadAggregator},
};
use rstest::fixture;
use std::sync::Arc;

/// First test user.
pub const ALICE: &str = "64b7f0c2a1d3e4f5a6b7c8d9";
/// Second test user.
pub const BOB: &str = "64b7f0c2a1d3e4f5a6b7c8da";
/// Third test user.
pub const CAROL: &str = "64b7f0c2a1d3e4f5a6b7c8db";

/// Store service type used across in-memory tests.
pub type TestStore = MessageStoreService<InMemoryMessageRepository, DefaultClock>;

/// Store and aggregator sharing one repository.
pub struct Harness {
    /// Message store service.
    pub store: TestStore,
    /// Unread aggregator over the same records.
    pub unread: UnreadAggregator<InMemoryMessageRepository>,
}

/// Provides a fresh store and aggregator for each test.
#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryMessageRepository::new());
    Harness {
        store: MessageStoreService::new(Arc::clone(&repository), Arc::new(DefaultClock)),
        unread: UnreadAggregator::new(repository),
    }
}

/// Returns a fixed timestamp offset by `minutes`.
///
/// # Panics
///
/// Panics if the base timestamp is invalid.
#[must_use]
pub fn at_minute(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(minutes)
}

/// Sends a message with an explicit timestamp.
///
/// # Panics
///
/// Panics if the store rejects the message.
pub async fn send_at(
    store: &TestStore,
    sender: &str,
    receiver: &str,
    text: &str,
    minutes: i64,
) -> DirectMessage {
    store
        .append(AppendMessageRequest::new(sender, receiver, text).with_sent_at(at_minute(minutes)))
        .await
        .expect("append should succeed")
}

/// Sends a message stamped by the store clock.
///
/// # Panics
///
/// Panics if the store rejects the message.
pub async fn send(store: &TestStore, sender: &str, receiver: &str, text: &str) -> DirectMessage {
    store
        .append(AppendMessageRequest::new(sender, receiver, text))
        .await
        .expect("append should succeed")
}

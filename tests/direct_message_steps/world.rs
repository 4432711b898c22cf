//! Shared world state for direct message BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use postbox::direct_message::{
    adapters::memory::InMemoryMessageRepository,
    domain::{DirectMessage, UnreadCounts, UserId},
    services::{MessageServiceResult, MessageStoreService, UnreadAggregator},
};
use rstest::fixture;

/// Store service type used by the BDD world.
pub type TestStore = MessageStoreService<InMemoryMessageRepository, DefaultClock>;

/// Scenario world for direct message behaviour tests.
pub struct MessagingWorld {
    /// The message store under test.
    pub store: TestStore,
    /// Unread aggregator sharing the store's records.
    pub unread: UnreadAggregator<InMemoryMessageRepository>,
    /// Conversation fetched by the last conversation step.
    pub conversation: Vec<DirectMessage>,
    /// Result of the last append attempt.
    pub last_append: Option<MessageServiceResult<DirectMessage>>,
    /// Count returned by the last mark-read call.
    pub last_updated: Option<u64>,
    /// Result of the last unread-count query.
    pub last_unread: Option<MessageServiceResult<UnreadCounts>>,
}

impl MessagingWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryMessageRepository::new());
        Self {
            store: MessageStoreService::new(Arc::clone(&repository), Arc::new(DefaultClock)),
            unread: UnreadAggregator::new(repository),
            conversation: Vec::new(),
            last_append: None,
            last_updated: None,
            last_unread: None,
        }
    }
}

impl Default for MessagingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MessagingWorld {
    MessagingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Resolves a scenario user name to its identifier.
///
/// # Errors
///
/// Returns an error for names the scenarios do not define.
pub fn user_id(name: &str) -> Result<&'static str, eyre::Report> {
    match name {
        "alice" => Ok("64b7f0c2a1d3e4f5a6b7c8d9"),
        "bob" => Ok("64b7f0c2a1d3e4f5a6b7c8da"),
        "carol" => Ok("64b7f0c2a1d3e4f5a6b7c8db"),
        other => Err(eyre::eyre!("unknown scenario user '{other}'")),
    }
}

/// Resolves a scenario user name to a parsed [`UserId`].
///
/// # Errors
///
/// Returns an error for unknown names.
pub fn parsed_user(name: &str) -> Result<UserId, eyre::Report> {
    UserId::parse(user_id(name)?).map_err(|err| eyre::eyre!("bad scenario id: {err}"))
}

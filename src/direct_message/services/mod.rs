//! Application services for direct messages.
//!
//! Services validate raw caller input, then orchestrate repository calls
//! under a per-call deadline.

mod deadline;
pub mod store;
pub mod unread;

pub use deadline::DEFAULT_OPERATION_DEADLINE;
pub use store::{
    AppendMessageRequest, MessageServiceError, MessageServiceResult, MessageStoreService,
};
pub use unread::UnreadAggregator;

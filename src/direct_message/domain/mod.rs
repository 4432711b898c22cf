//! Domain model for direct messages.
//!
//! Pure types with no infrastructure dependencies: identifiers, the message
//! aggregate, its creation draft, and the per-sender unread tally. All types
//! are serialisable via serde.

mod error;
mod ids;
mod message;
mod text;
mod unread;

pub use error::MessageDomainError;
pub use ids::{MessageId, USER_ID_HEX_LENGTH, UserId};
pub use message::{DirectMessage, DraftMessage, PersistedMessageData};
pub use text::MessageText;
pub use unread::UnreadCounts;

//! HTTP boundary for direct messages.
//!
//! Handlers accept deserialized request payloads and return
//! [`ApiResponse`] values, leaving routing and transport to the host
//! framework.

pub mod handlers;
pub mod requests;
pub mod response;

pub use handlers::MessageApi;
pub use requests::{ConversationParams, CreateMessageRequest, MarkReadRequest};
pub use response::ApiResponse;

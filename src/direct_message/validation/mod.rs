//! Boundary validation for direct message requests.
//!
//! Normalises raw request fields into typed commands and rejects malformed
//! input with field-level detail before anything reaches the store.

pub mod config;
pub mod fields;
pub mod rules;

pub use config::ValidationConfig;
pub use fields::{Field, FieldErrors, FieldIssue};
pub use rules::{
    ConversationQuery, MarkReadCommand, validate_conversation_query, validate_mark_read,
    validate_new_message, validate_unread_query,
};

//! Persistence adapters for the direct message module.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryMessageRepository`]: thread-safe in-memory storage
//! - [`postgres::PostgresMessageRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM
//!
//! Both implement [`MessageRepository`] with identical ordering and
//! read-state semantics.
//!
//! [`MessageRepository`]: crate::direct_message::ports::repository::MessageRepository

pub mod memory;
pub mod postgres;

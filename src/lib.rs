//! Postbox: direct messaging core.
//!
//! This crate stores one-to-one text messages between users, answers
//! conversation queries, tracks read state, and aggregates unread counts
//! per sender.
//!
//! # Architecture
//!
//! Postbox follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`direct_message`]: Message storage, conversations, and unread counts
//! - [`config`]: Environment-driven store configuration
//! - [`telemetry`]: Structured logging setup

pub mod config;
pub mod direct_message;
pub mod telemetry;

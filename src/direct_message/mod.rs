//! One-to-one direct messaging between users.
//!
//! Stores messages, answers conversation queries between two users, tracks
//! per-message read state, and aggregates unread counts per sender. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Boundary checks in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - HTTP-facing handlers in [`api`]

pub mod adapters;
pub mod api;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

//! Port trait definitions for the direct message subsystem.
//!
//! Ports define the abstract interfaces the services require from
//! infrastructure. Adapters implement them for concrete storage.

pub mod repository;

pub use repository::{MessageRepository, StorageResult};

//! Diesel row models for direct message persistence.

use super::schema::direct_messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row for direct message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = direct_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DirectMessageRow {
    /// Message identifier.
    pub id: Uuid,
    /// Sending user identifier.
    pub sender_id: String,
    /// Receiving user identifier.
    pub receiver_id: String,
    /// Message text.
    pub text: String,
    /// Send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Read flag.
    pub read: bool,
}

/// Insert model for direct message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = direct_messages)]
pub struct NewDirectMessageRow {
    /// Message identifier.
    pub id: Uuid,
    /// Sending user identifier.
    pub sender_id: String,
    /// Receiving user identifier.
    pub receiver_id: String,
    /// Message text.
    pub text: String,
    /// Send timestamp.
    pub sent_at: DateTime<Utc>,
    /// Read flag.
    pub read: bool,
}

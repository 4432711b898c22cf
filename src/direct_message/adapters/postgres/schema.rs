//! Diesel schema for direct message persistence.

diesel::table! {
    /// Direct message records.
    direct_messages (id) {
        /// Time-ordered message identifier.
        id -> Uuid,
        /// Sending user identifier.
        #[max_length = 24]
        sender_id -> Varchar,
        /// Receiving user identifier.
        #[max_length = 24]
        receiver_id -> Varchar,
        /// Message text.
        text -> Text,
        /// Send timestamp.
        sent_at -> Timestamptz,
        /// Whether the receiver has acknowledged the message.
        read -> Bool,
    }
}

//! Shared fixtures for direct message unit tests.

use crate::direct_message::domain::{DirectMessage, DraftMessage, MessageText, UserId};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

pub const ALICE: &str = "64b7f0c2a1d3e4f5a6b7c8d9";
pub const BOB: &str = "64b7f0c2a1d3e4f5a6b7c8da";
pub const CAROL: &str = "64b7f0c2a1d3e4f5a6b7c8db";

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn minutes_after_epoch(minutes: i64) -> DateTime<Utc> {
    epoch() + Duration::minutes(minutes)
}

pub fn uid(raw: &str) -> UserId {
    UserId::parse(raw).expect("valid user id")
}

pub fn message_at(sender: &str, receiver: &str, text: &str, minutes: i64) -> DirectMessage {
    let draft = DraftMessage::new(
        uid(sender),
        uid(receiver),
        MessageText::new(text).expect("valid text"),
    )
    .with_sent_at(minutes_after_epoch(minutes));
    DirectMessage::from_draft(draft, &FixedClock(epoch()))
}

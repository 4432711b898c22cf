//! Per-sender unread tallies for a single recipient.

use super::UserId;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::collections::hash_map;

/// Mapping from sender to the number of unread messages that sender has
/// addressed to one recipient.
///
/// Senders with no unread messages are absent; the map never holds a zero
/// count. Iteration order is unspecified.
///
/// # Examples
///
/// ```
/// use postbox::direct_message::domain::{UnreadCounts, UserId};
///
/// let alice = UserId::parse("64b7f0c2a1d3e4f5a6b7c8d9").expect("valid id");
/// let bob = UserId::parse("64b7f0c2a1d3e4f5a6b7c8da").expect("valid id");
///
/// let counts = UnreadCounts::from_senders([&alice, &bob, &alice]);
/// assert_eq!(counts.get(&alice), 2);
/// assert_eq!(counts.get(&bob), 1);
/// assert_eq!(counts.total(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnreadCounts(HashMap<UserId, u64>);

impl<'de> Deserialize<'de> for UnreadCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashMap::<UserId, u64>::deserialize(deserializer).map(Self::from_grouped)
    }
}

impl UnreadCounts {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tally by counting each occurrence of a sender.
    ///
    /// This is a streaming group-by-count: each item contributes one unread
    /// message for its sender.
    #[must_use]
    pub fn from_senders<'a>(senders: impl IntoIterator<Item = &'a UserId>) -> Self {
        let mut counts = Self::new();
        for sender in senders {
            counts.increment(sender);
        }
        counts
    }

    /// Builds a tally from pre-aggregated `(sender, count)` pairs.
    ///
    /// Pairs with a zero count are dropped and repeated senders are summed.
    #[must_use]
    pub fn from_grouped(groups: impl IntoIterator<Item = (UserId, u64)>) -> Self {
        let mut counts = HashMap::new();
        for (sender, count) in groups {
            if count == 0 {
                continue;
            }
            let entry = counts.entry(sender).or_insert(0_u64);
            *entry = entry.saturating_add(count);
        }
        Self(counts)
    }

    fn increment(&mut self, sender: &UserId) {
        let entry = self.0.entry(sender.clone()).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    /// Returns the unread count for a sender, or zero when absent.
    #[must_use]
    pub fn get(&self, sender: &UserId) -> u64 {
        self.0.get(sender).copied().unwrap_or(0)
    }

    /// Returns the number of senders with at least one unread message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no sender has unread messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the sum of all per-sender counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0
            .values()
            .fold(0_u64, |sum, count| sum.saturating_add(*count))
    }

    /// Iterates over `(sender, count)` pairs in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, UserId, u64> {
        self.0.iter()
    }

    /// Consumes the tally and returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<UserId, u64> {
        self.0
    }
}

impl<'a> IntoIterator for &'a UnreadCounts {
    type Item = (&'a UserId, &'a u64);
    type IntoIter = hash_map::Iter<'a, UserId, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

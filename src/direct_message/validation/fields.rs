//! Field-level error reporting for boundary validation.

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// A request field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// The sending user's identifier.
    SenderId,
    /// The receiving user's identifier.
    ReceiverId,
    /// The message text.
    Text,
    /// The user identifier addressed by an unread-count query.
    UserId,
}

impl Field {
    /// Returns the field's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SenderId => "senderId",
            Self::ReceiverId => "receiverId",
            Self::Text => "text",
            Self::UserId => "userId",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::SenderId => "Sender ID",
            Self::ReceiverId => "Receiver ID",
            Self::Text => "Text",
            Self::UserId => "User ID",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    /// The field was absent or empty.
    Missing,
    /// The field was present but not a well-formed identifier.
    Malformed,
    /// The field exceeded its maximum length in characters.
    TooLong {
        /// The configured maximum.
        max: usize,
    },
}

impl FieldIssue {
    /// Renders a human-readable reason for `field`.
    #[must_use]
    pub fn reason(self, field: Field) -> String {
        match (self, field) {
            (Self::Missing | Self::Malformed, Field::UserId) => {
                "Valid user ID is required".to_owned()
            }
            (Self::Missing, _) => format!("{} is required", field.label()),
            (Self::Malformed, _) => format!("{} is not a valid identifier", field.label()),
            (Self::TooLong { max }, _) => {
                format!("{} must be at most {max} characters", field.label())
            }
        }
    }
}

/// Sparse mapping from failing field to the reason it failed.
///
/// Only failing fields are present: absence of a key means that field
/// passed. Iteration follows field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldIssue>);

impl FieldErrors {
    /// Creates an empty set of field errors.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records a failure for `field`, replacing any earlier failure.
    pub fn insert(&mut self, field: Field, issue: FieldIssue) {
        self.0.insert(field, issue);
    }

    /// Returns the failure recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<FieldIssue> {
        self.0.get(&field).copied()
    }

    /// Returns `true` when `field` failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns the number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over failing fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldIssue)> + '_ {
        self.0.iter().map(|(field, issue)| (*field, *issue))
    }

    /// Returns the failing fields as `(wire name, reason)` pairs.
    #[must_use]
    pub fn reasons(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, issue)| (field.as_str(), issue.reason(field)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a Field, &'a FieldIssue);
    type IntoIter = btree_map::Iter<'a, Field, FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, issue) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", issue.reason(field))?;
        }
        Ok(())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.iter()
                .map(|(field, issue)| (field.as_str(), issue.reason(field))),
        )
    }
}

//! Assignment data model: the fact that an image carries a category.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};

use super::CategoryId;

/// Mapping from image path to its ordered assignment list.
///
/// Invariant: a path present in the map always has a non-empty list. The
/// entry is removed entirely when its last assignment goes away.
pub type AssignmentMap = HashMap<String, Vec<Assignment>>;

/// A single category attached to an image, with the time of attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The attached category.
    pub category_id: CategoryId,
    /// Attachment time as an ISO-8601 UTC string, so lexical order matches
    /// temporal order.
    pub assigned_at: String,
}

impl Assignment {
    /// Create an assignment stamped with the current time.
    pub fn now(category_id: impl Into<CategoryId>) -> Self {
        Self {
            category_id: category_id.into(),
            assigned_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Create an assignment with an explicit timestamp (used when loading).
    pub fn at(category_id: impl Into<CategoryId>, assigned_at: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            assigned_at: assigned_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_iso_ordered() {
        let a = Assignment::now("cat-1");
        let b = Assignment::now("cat-2");
        // Millisecond timestamps from the same process are non-decreasing.
        assert!(a.assigned_at <= b.assigned_at);
        assert!(a.assigned_at.ends_with('Z'));
    }
}

// The flagged-review set — the one output of an analysis run.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

/// Review identifiers marked for removal.
///
/// Keeps first-insertion order for stable output, and inserting an id that is
/// already present does nothing, so a review can never be flagged twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlaggedReviews {
    order: Vec<String>,
    members: HashSet<String>,
}

impl FlaggedReviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a review. Returns false if it was already flagged.
    pub fn insert(&mut self, review_id: &str) -> bool {
        if self.members.contains(review_id) {
            return false;
        }
        self.members.insert(review_id.to_string());
        self.order.push(review_id.to_string());
        true
    }

    pub fn contains(&self, review_id: &str) -> bool {
        self.members.contains(review_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identifiers in the order they were flagged.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl Serialize for FlaggedReviews {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.order)
    }
}

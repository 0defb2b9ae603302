//! Partial-data accounting for batch transformations.
//!
//! A single bad row must never abort a whole batch: the row is skipped,
//! the batch continues, and the caller receives a [`SkipReport`] listing
//! what was dropped and why, so it can decide whether to log or degrade.

use serde::{Deserialize, Serialize};

/// One item that was skipped during a batch transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// Identifier of the skipped item (field name, snippet id, URI...).
    pub item: String,
    /// Human-readable reason the item was skipped.
    pub reason: String,
}

/// Accumulated record of skipped items for one transformation pass.
///
/// Serializes as `{"count": 2, "items": [...]}` so callers get the
/// cheap count up front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipReport {
    /// Number of skipped items.
    #[serde(default)]
    count: usize,
    /// The skipped items in encounter order.
    #[serde(default)]
    items: Vec<SkippedItem>,
}

impl SkipReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped item.
    pub fn skip<I, R>(&mut self, item: I, reason: R)
    where
        I: Into<String>,
        R: Into<String>,
    {
        self.items.push(SkippedItem {
            item: item.into(),
            reason: reason.into(),
        });
        self.count = self.items.len();
    }

    /// Number of skipped items.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` when nothing was skipped.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The skipped items in encounter order.
    pub fn items(&self) -> &[SkippedItem] {
        &self.items
    }

    /// Absorbs another report, preserving encounter order.
    pub fn merge(&mut self, other: SkipReport) {
        self.items.extend(other.items);
        self.count = self.items.len();
    }
}

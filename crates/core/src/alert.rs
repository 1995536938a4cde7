//! Alert severities and the newest-first alert log.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Tri-state alert classification, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Conditions nominal.
    Normal,
    /// Mild deviation, or a locally detected threshold violation.
    Attention,
    /// Conditions needing immediate action.
    Critical,
}

impl Severity {
    pub fn is_violation(self) -> bool {
        self != Severity::Normal
    }
}

/// One entry in a crop's alert log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub timestamp: Timestamp,
    pub message: String,
    pub severity: Severity,
}

/// Default number of alerts retained per crop.
pub const DEFAULT_ALERT_LOG_CAPACITY: usize = 20;

/// Fixed-capacity alert log. New entries go to the front; the oldest entry
/// falls off the tail once capacity is exceeded.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: VecDeque<AlertEntry>,
    capacity: usize,
}

impl AlertLog {
    /// Create an empty log. A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front and truncate to capacity.
    pub fn prepend(&mut self, entry: AlertEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&AlertEntry> {
        self.entries.front()
    }

    /// Entries newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &AlertEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ALERT_LOG_CAPACITY)
    }
}

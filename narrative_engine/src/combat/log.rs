//! Round log - bounded display history for an encounter.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How many round summaries an encounter retains.
pub const ROUND_LOG_LIMIT: usize = 8;

/// One resolved round, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEntry {
    pub round: u32,
    pub text: String,
}

impl RoundEntry {
    pub fn new(round: u32, text: impl Into<String>) -> Self {
        Self {
            round,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for RoundEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.round, self.text)
    }
}

/// The most recent round summaries, oldest first.
///
/// Entries past [`ROUND_LOG_LIMIT`] are dropped from the front as new rounds
/// resolve; only the recent window matters for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoundLog {
    entries: VecDeque<RoundEntry>,
}

impl RoundLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a round summary, dropping the oldest entry past the bound.
    pub fn push(&mut self, entry: RoundEntry) {
        if self.entries.len() == ROUND_LOG_LIMIT {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate retained entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RoundEntry> {
        self.entries.iter()
    }

    /// The retained summaries as display strings, oldest first.
    pub fn recent(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }
}

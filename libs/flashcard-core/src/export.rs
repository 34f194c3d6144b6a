//! Progress export.
//!
//! A one-shot snapshot of which cards were marked known and unknown. It is
//! not a resumable save format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification snapshot written as a downloadable JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub known: Vec<usize>,
    pub unknown: Vec<usize>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

impl ExportSnapshot {
    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Suggested file name, e.g. `flashcards-progress-20240301-142530.json`.
    pub fn file_name(&self) -> String {
        format!(
            "flashcards-progress-{}.json",
            self.timestamp.format("%Y%m%d-%H%M%S")
        )
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub term: String,
    pub timestamp: DateTime<Utc>,
}

/// Recent distinct queries, most recent first, capped at [`HISTORY_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `term` to the front, dropping any older occurrence and the
    /// oldest entries past the limit. Blank queries are ignored.
    pub fn record(&mut self, term: &str, at: DateTime<Utc>) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        self.entries.retain(|e| e.term != term);
        self.entries.insert(
            0,
            HistoryEntry {
                term: term.to_string(),
                timestamp: at,
            },
        );
        self.entries.truncate(HISTORY_LIMIT);
        true
    }

    pub fn remove(&mut self, term: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.term != term);
        self.entries.len() != before
    }

    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(mut entries: Vec<HistoryEntry>) -> Self {
        // Stored order is trusted only loosely; newest wins on duplicates.
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut history = History::new();
        for entry in entries {
            let term = entry.term.trim();
            if term.is_empty() || history.entries.iter().any(|e| e.term == term) {
                continue;
            }
            if history.entries.len() == HISTORY_LIMIT {
                break;
            }
            history.entries.push(HistoryEntry {
                term: term.to_string(),
                timestamp: entry.timestamp,
            });
        }
        history
    }
}

impl From<History> for Vec<HistoryEntry> {
    fn from(history: History) -> Self {
        history.entries
    }
}

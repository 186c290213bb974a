//! Append-only log of file runs, newest first.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kernel::services::ports::settings::DEFAULT_HISTORY_LIMIT;
use crate::models::{now_millis, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    pub file_path: String,
    pub file_name: String,
    pub language: String,
    pub content: String,
    /// Runner output. Failed runs are never recorded.
    #[serde(default)]
    pub output: String,
    pub created_at: Timestamp,
}

/// Everything except the generated id and, optionally, the timestamp.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub user_id: String,
    pub file_path: String,
    pub file_name: String,
    pub language: String,
    pub content: String,
    pub output: String,
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionLog {
    entries: Vec<HistoryEntry>,
    #[serde(skip, default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for ExecutionLog {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl ExecutionLog {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Applies a new cap, dropping the oldest entries beyond it.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.entries.truncate(self.limit);
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn add_entry(&mut self, new: NewEntry) -> &HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            file_path: new.file_path,
            file_name: new.file_name,
            language: new.language,
            content: new.content,
            output: new.output,
            created_at: new.created_at.unwrap_or_else(now_millis),
        };
        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
        &self.entries[0]
    }

    pub fn for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        self.entries.iter().filter(move |e| e.user_id == user_id)
    }

    pub fn clear_for_user(&mut self, user_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.user_id != user_id);
        before - self.entries.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/history.rs"]
mod tests;

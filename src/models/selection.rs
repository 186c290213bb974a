use serde::{Deserialize, Serialize};

use super::node::{NodeSnapshot, NodeUid};
use super::path;

/// The explorer's current selection, held by path.
///
/// Nothing is validated on write; readers resolve the path through the tree,
/// so a stale selection simply reads as "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    path: Option<String>,
}

impl Selection {
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn set(&mut self, path: Option<String>) -> bool {
        if self.path == path {
            return false;
        }
        self.path = path;
        true
    }

    pub fn clear(&mut self) -> bool {
        self.path.take().is_some()
    }

    /// Drops the selection when it points at `removed` or below it.
    pub fn clear_if_under(&mut self, removed: &str) -> bool {
        let should_clear = self
            .path
            .as_deref()
            .is_some_and(|p| path::is_ancestor_or_self(removed, p));
        if should_clear {
            self.path = None;
        }
        should_clear
    }

    /// Follows a rename or move of `old` (or one of its ancestors) to `new`.
    pub fn rewrite_prefix(&mut self, old: &str, new: &str) -> bool {
        match self.path.as_mut() {
            Some(p) if path::is_ancestor_or_self(old, p) => {
                *p = path::rewrite_prefix(p, old, new);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardOp {
    Copy,
    Cut,
}

/// A pending copy/cut. `snapshot` is a deep copy taken when the entry was
/// written; later edits to the live tree never reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub op: ClipboardOp,
    pub source_id: NodeUid,
    pub source_path: String,
    pub snapshot: NodeSnapshot,
}

impl ClipboardEntry {
    pub fn is_cut(&self) -> bool {
        self.op == ClipboardOp::Cut
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/selection.rs"]
mod tests;

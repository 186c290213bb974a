use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kernel::language::LanguageId;
use crate::models::path;
use crate::models::NodeUid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabError {
    #[error("file no longer exists: {path}")]
    FileGone { path: String },

    #[error("unknown tab: {0}")]
    UnknownTab(TabId),
}

/// An open editing session. `path` is the binding into the tree; the store
/// keeps it current across renames and moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorTab {
    pub id: TabId,
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub source_id: Option<NodeUid>,
    pub language: LanguageId,
    pub content: String,
    #[serde(default)]
    pub dirty: bool,
    /// The bound file was deleted. Content is kept so nothing typed is lost.
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub cursor: CursorPosition,
}

/// 1-based line/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub line_number: u32,
    pub column: u32,
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self {
            line_number: 1,
            column: 1,
        }
    }
}

impl EditorTab {
    pub fn from_file(id: TabId, path: &str, content: &str, source_id: Option<NodeUid>) -> Self {
        let mut tab = Self {
            id,
            title: String::new(),
            path: String::new(),
            source_id,
            language: LanguageId::PlainText,
            content: content.to_string(),
            dirty: false,
            removed: false,
            cursor: CursorPosition::default(),
        };
        tab.set_path(path.to_string());
        tab
    }

    pub fn set_path(&mut self, path: String) {
        self.title = match path::basename(&path) {
            "" => "Untitled".to_string(),
            name => name.to_string(),
        };
        self.language = LanguageId::from_name(&self.title);
        self.path = path;
    }

    pub fn display_title(&self) -> String {
        match (self.removed, self.dirty) {
            (true, _) => format!("{} (deleted)", self.title),
            (false, true) => format!("{} ●", self.title),
            (false, false) => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabRegistry {
    tabs: Vec<EditorTab>,
    active: usize,
    next_tab_id: u64,
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistry {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: 0,
            next_tab_id: 1,
        }
    }

    fn alloc_tab_id(&mut self) -> TabId {
        // persisted state may predate the counter
        let floor = self.tabs.iter().map(|t| t.id.raw() + 1).max().unwrap_or(1);
        let id = TabId::new(self.next_tab_id.max(floor));
        self.next_tab_id = id.raw().saturating_add(1);
        id
    }

    fn index_of(&self, id: TabId) -> Result<usize, TabError> {
        self.tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or(TabError::UnknownTab(id))
    }

    fn tab_mut(&mut self, id: TabId) -> Result<&mut EditorTab, TabError> {
        let index = self.index_of(id)?;
        Ok(&mut self.tabs[index])
    }

    pub fn tabs(&self) -> &[EditorTab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&EditorTab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_for_path(&self, path: &str) -> Option<&EditorTab> {
        self.tabs.iter().find(|t| t.path == path)
    }

    pub fn active_tab(&self) -> Option<&EditorTab> {
        self.tabs.get(self.active)
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Opens `path`, reusing a tab already bound to it. A live tab wins over
    /// a removed one; a reused removed tab is refreshed from `content`.
    pub fn open_file(&mut self, path: &str, content: &str, source_id: Option<NodeUid>) -> TabId {
        let existing = self
            .tabs
            .iter()
            .position(|t| !t.removed && t.path == path)
            .or_else(|| self.tabs.iter().position(|t| t.path == path));
        if let Some(index) = existing {
            let tab = &mut self.tabs[index];
            if tab.removed {
                tab.content = content.to_string();
                tab.source_id = source_id;
                tab.removed = false;
                tab.dirty = false;
            }
            self.active = index;
            return tab.id;
        }

        let id = self.alloc_tab_id();
        self.tabs
            .push(EditorTab::from_file(id, path, content, source_id));
        self.active = self.tabs.len().saturating_sub(1);
        tracing::debug!(path, tab = id.raw(), "tab opened");
        id
    }

    pub fn set_active(&mut self, id: TabId) -> Result<bool, TabError> {
        let index = self.index_of(id)?;
        if index == self.active {
            return Ok(false);
        }
        self.active = index;
        Ok(true)
    }

    /// Closes a tab. Closing the active tab activates its right neighbour, or
    /// the left one when it was last.
    pub fn close_tab(&mut self, id: TabId) -> Result<(), TabError> {
        let index = self.index_of(id)?;
        self.tabs.remove(index);
        if self.tabs.is_empty() {
            self.active = 0;
        } else if self.active >= self.tabs.len() {
            self.active = self.tabs.len().saturating_sub(1);
        } else if self.active > index {
            self.active = self.active.saturating_sub(1);
        }
        Ok(())
    }

    pub fn next_tab(&mut self) -> bool {
        let len = self.tabs.len();
        if len <= 1 {
            return false;
        }
        let prev = self.active;
        self.active = (self.active + 1) % len;
        self.active != prev
    }

    pub fn prev_tab(&mut self) -> bool {
        let len = self.tabs.len();
        if len <= 1 {
            return false;
        }
        let prev = self.active;
        self.active = if self.active == 0 {
            len - 1
        } else {
            self.active - 1
        };
        self.active != prev
    }

    pub fn update_content(&mut self, id: TabId, content: &str) -> Result<bool, TabError> {
        let tab = self.tab_mut(id)?;
        if tab.content == content {
            return Ok(false);
        }
        tab.content = content.to_string();
        tab.dirty = true;
        Ok(true)
    }

    pub fn set_cursor(&mut self, id: TabId, line_number: u32, column: u32) -> Result<bool, TabError> {
        let tab = self.tab_mut(id)?;
        let cursor = CursorPosition {
            line_number: line_number.max(1),
            column: column.max(1),
        };
        Ok(std::mem::replace(&mut tab.cursor, cursor) != cursor)
    }

    /// Re-binds every live tab at or below `old` after a rename or move.
    /// Removed tabs keep the path their file was deleted from.
    pub fn rebind(&mut self, old: &str, new: &str) -> usize {
        let mut count = 0;
        for tab in &mut self.tabs {
            if !tab.removed && path::is_ancestor_or_self(old, &tab.path) {
                let rewritten = path::rewrite_prefix(&tab.path, old, new);
                tab.set_path(rewritten);
                count += 1;
            }
        }
        count
    }

    /// Flags every tab at or below `removed`; the tabs stay open.
    pub fn mark_removed(&mut self, removed: &str) -> usize {
        let mut count = 0;
        for tab in &mut self.tabs {
            if !tab.removed && path::is_ancestor_or_self(removed, &tab.path) {
                tab.removed = true;
                count += 1;
            }
        }
        count
    }

    pub fn mark_all_removed(&mut self) -> usize {
        self.mark_removed(path::ROOT)
    }

    /// What to write for a save. Removed tabs yield `FileGone`.
    pub fn save_request(&self, id: TabId) -> Result<(String, String), TabError> {
        let tab = self.tab(id).ok_or(TabError::UnknownTab(id))?;
        if tab.removed {
            return Err(TabError::FileGone {
                path: tab.path.clone(),
            });
        }
        Ok((tab.path.clone(), tab.content.clone()))
    }

    pub fn mark_saved(&mut self, id: TabId) -> Result<bool, TabError> {
        let tab = self.tab_mut(id)?;
        Ok(std::mem::replace(&mut tab.dirty, false))
    }

    /// Clears the removed flag once the file has been recreated.
    pub fn mark_restored(&mut self, id: TabId, source_id: Option<NodeUid>) -> Result<(), TabError> {
        let tab = self.tab_mut(id)?;
        tab.removed = false;
        tab.source_id = source_id;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/tabs.rs"]
mod tests;

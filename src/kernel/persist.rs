//! 工作区持久化
//!
//! Three documents, each a whole-value snapshot rewritten on change:
//! the tree (with selection and clipboard), the open tabs, and the run history.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::editor::TabRegistry;
use super::history::ExecutionLog;
use super::seed::initial_tree;
use super::services::ports::settings::Settings;
use super::services::ports::storage::{KeyValueStore, StorageError};
use super::{Effect, Store, WorkspaceState};
use crate::models::{ClipboardEntry, NodeSnapshot, VfsError, VfsTree};

pub const WORKSPACE_KEY: &str = "file-system-storage";
pub const EDITOR_KEY: &str = "editor-storage";
pub const HISTORY_KEY: &str = "history-storage";
pub const WORKSPACE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct WorkspaceDocument {
    version: u32,
    root: NodeSnapshot,
    #[serde(default)]
    selected: Option<String>,
    #[serde(default)]
    clipboard: Option<ClipboardEntry>,
}

#[derive(Debug, Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: Option<u32>,
}

#[derive(Debug, Error)]
enum DecodeError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported version {0:?}")]
    Version(Option<u32>),

    #[error(transparent)]
    Tree(#[from] VfsError),
}

fn decode_workspace(raw: &str) -> Result<VfsTree, DecodeError> {
    let probe: VersionProbe = serde_json::from_str(raw)?;
    if probe.version != Some(WORKSPACE_VERSION) {
        return Err(DecodeError::Version(probe.version));
    }
    let doc: WorkspaceDocument = serde_json::from_str(raw)?;
    let tree = VfsTree::from_snapshot(&doc.root)?;
    Ok(tree.restore(doc.selected, doc.clipboard))
}

pub fn save_workspace(kv: &mut impl KeyValueStore, tree: &VfsTree) -> Result<(), StorageError> {
    let doc = WorkspaceDocument {
        version: WORKSPACE_VERSION,
        root: tree.snapshot(),
        selected: tree.selected_path().map(str::to_string),
        clipboard: tree.clipboard().cloned(),
    };
    kv.set(WORKSPACE_KEY, &serde_json::to_string(&doc)?)
}

/// Loads the saved tree. Missing, malformed or other-version state is
/// replaced by the initial tree; only store I/O failures are errors.
pub fn load_workspace(kv: &impl KeyValueStore, seed: bool) -> Result<VfsTree, StorageError> {
    let Some(raw) = kv.get(WORKSPACE_KEY)? else {
        tracing::info!("no saved workspace, starting fresh");
        return Ok(initial_tree(seed));
    };
    match decode_workspace(&raw) {
        Ok(tree) => Ok(tree),
        Err(e) => {
            tracing::warn!(error = %e, "saved workspace unusable, starting fresh");
            Ok(initial_tree(seed))
        }
    }
}

fn load_or_default<T: DeserializeOwned + Default>(
    kv: &impl KeyValueStore,
    key: &str,
) -> Result<T, StorageError> {
    let Some(raw) = kv.get(key)? else {
        return Ok(T::default());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "saved state unusable, using defaults");
        T::default()
    }))
}

pub fn save_editor(kv: &mut impl KeyValueStore, tabs: &TabRegistry) -> Result<(), StorageError> {
    kv.set(EDITOR_KEY, &serde_json::to_string(tabs)?)
}

pub fn load_editor(kv: &impl KeyValueStore) -> Result<TabRegistry, StorageError> {
    load_or_default(kv, EDITOR_KEY)
}

pub fn save_history(kv: &mut impl KeyValueStore, log: &ExecutionLog) -> Result<(), StorageError> {
    kv.set(HISTORY_KEY, &serde_json::to_string(log)?)
}

pub fn load_history(kv: &impl KeyValueStore, limit: usize) -> Result<ExecutionLog, StorageError> {
    let mut log: ExecutionLog = load_or_default(kv, HISTORY_KEY)?;
    log.set_limit(limit);
    Ok(log)
}

/// Loads all three documents and flags tabs whose file is not in the
/// loaded tree.
pub fn load_state(kv: &impl KeyValueStore, settings: &Settings) -> Result<WorkspaceState, StorageError> {
    let tree = load_workspace(kv, settings.seed_default_tree)?;
    let mut tabs = load_editor(kv)?;
    let history = load_history(kv, settings.history_limit)?;

    let stale: Vec<String> = tabs
        .tabs()
        .iter()
        .filter(|t| !t.removed && !tree.lookup(&t.path).is_some_and(|n| n.is_file()))
        .map(|t| t.path.clone())
        .collect();
    for path in &stale {
        tabs.mark_removed(path);
    }
    if !stale.is_empty() {
        tracing::warn!(count = stale.len(), "open tabs point at missing files");
    }

    Ok(WorkspaceState::new(tree, tabs, history))
}

/// Runs persistence effects against `kv` and returns the output texts to
/// show, in order.
pub fn apply_effects(
    store: &Store,
    kv: &mut impl KeyValueStore,
    effects: &[Effect],
) -> Result<Vec<String>, StorageError> {
    let state = store.state();
    let mut outputs = Vec::new();
    let mut done = Vec::with_capacity(3);

    for effect in effects {
        if done.contains(effect) {
            continue;
        }
        match effect {
            Effect::PersistWorkspace => save_workspace(kv, &state.tree)?,
            Effect::PersistEditor => save_editor(kv, &state.tabs)?,
            Effect::PersistHistory => save_history(kv, &state.history)?,
            Effect::ShowOutput(text) => {
                outputs.push(text.clone());
                continue;
            }
        }
        done.push(effect.clone());
    }
    Ok(outputs)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/persist.rs"]
mod tests;

use super::editor::TabRegistry;
use super::history::ExecutionLog;
use crate::models::VfsTree;

/// Everything the store owns and persists.
#[derive(Debug, Default)]
pub struct WorkspaceState {
    pub tree: VfsTree,
    pub tabs: TabRegistry,
    pub history: ExecutionLog,
}

impl WorkspaceState {
    pub fn new(tree: VfsTree, tabs: TabRegistry, history: ExecutionLog) -> Self {
        Self {
            tree,
            tabs,
            history,
        }
    }
}

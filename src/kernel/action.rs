use crate::kernel::editor::TabId;
use crate::models::ClipboardOp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateFile {
        parent: String,
        name: String,
        content: String,
    },
    CreateDirectory {
        parent: String,
        name: String,
    },
    DeleteNode {
        path: String,
    },
    RenameNode {
        path: String,
        new_name: String,
    },
    MoveNode {
        source: String,
        target_dir: String,
    },
    UpdateFileContent {
        path: String,
        content: String,
    },
    CopyToClipboard {
        path: String,
        op: ClipboardOp,
    },
    Paste {
        target_dir: String,
    },
    ClearClipboard,
    Select {
        path: Option<String>,
    },
    OpenFile {
        path: String,
    },
    CloseTab {
        id: TabId,
    },
    SetActiveTab {
        id: TabId,
    },
    EditTab {
        id: TabId,
        content: String,
    },
    SetCursor {
        id: TabId,
        line_number: u32,
        column: u32,
    },
    /// `recreate` brings back a deleted file (and missing parents) instead
    /// of failing with `FileGone`.
    SaveTab {
        id: TabId,
        recreate: bool,
    },
    RunFile {
        path: String,
    },
    ClearHistory,
    ResetWorkspace {
        seed: bool,
    },
}

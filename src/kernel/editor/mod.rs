//! Editor domain: open tabs bound to workspace paths.

mod tabs;

pub use tabs::{CursorPosition, EditorTab, TabError, TabId, TabRegistry};

//! Headless workspace core (state/action/effect).

pub mod action;
pub mod editor;
pub mod effect;
pub mod error;
pub mod history;
pub mod import;
pub mod language;
pub mod persist;
pub mod runner;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use editor::{CursorPosition, EditorTab, TabError, TabId, TabRegistry};
pub use effect::Effect;
pub use error::StoreError;
pub use history::{ExecutionLog, HistoryEntry, NewEntry};
pub use import::{import_directory, ImportError, ImportReport, SkippedEntry};
pub use language::LanguageId;
pub use runner::{CodeRunner, RunnerError, RunnerRegistry};
pub use state::WorkspaceState;
pub use store::{DispatchResult, Store};

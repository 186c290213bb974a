use thiserror::Error;

/// Failures of tree operations. All are local and recoverable: the tree,
/// selection and clipboard are untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("parent directory not found: {0}")]
    ParentNotFound(String),

    #[error("source not found: {0}")]
    SourceNotFound(String),

    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("name already exists in {dir}: {name}")]
    NameCollision { dir: String, name: String },

    #[error("cannot delete the root directory")]
    CannotDeleteRoot,

    #[error("cannot rename the root directory")]
    CannotRenameRoot,

    #[error("cannot move {from} into {into}")]
    InvalidTarget { from: String, into: String },

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

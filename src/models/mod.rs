//! 数据模型层

pub mod error;
pub mod node;
pub mod path;
pub mod selection;
pub mod vfs_tree;

pub use error::VfsError;
pub use node::{extension_of, now_millis, NodeId, NodeKind, NodeSnapshot, NodeUid, Timestamp};
pub use selection::{ClipboardEntry, ClipboardOp, Selection};
pub use vfs_tree::{NodeRef, TreeRow, VfsTree, DEFAULT_ROOT_NAME};

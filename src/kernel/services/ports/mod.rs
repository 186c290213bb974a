//! Service ports: traits + data contracts.

pub mod directory;
pub mod settings;
pub mod storage;

pub use directory::{DirectoryHandle, EntryKind, HandleEntry, HandleError};
pub use settings::Settings;
pub use storage::{KeyValueStore, StorageError};

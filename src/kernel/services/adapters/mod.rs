//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod local_dir;
pub mod paths;
pub mod settings;
pub mod storage;

pub use local_dir::LocalDirectoryHandle;
pub use paths::{
    ensure_data_dir, ensure_log_dir, ensure_settings_dir, get_data_dir, get_log_dir, get_settings_dir,
    get_storage_dir,
};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};

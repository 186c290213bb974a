use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "webcode=info";
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the platform data directory for persisted state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_import_ignore")]
    pub import_ignore: Vec<String>,
    #[serde(default = "default_true")]
    pub seed_default_tree: bool,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_user_id() -> String {
    "local".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_import_ignore() -> Vec<String> {
    [".git", "node_modules", "target", ".DS_Store"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: None,
            log_filter: default_log_filter(),
            user_id: default_user_id(),
            history_limit: default_history_limit(),
            import_ignore: default_import_ignore(),
            seed_default_tree: true,
        }
    }
}

impl Settings {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.import_ignore.iter().any(|n| n == name)
    }
}

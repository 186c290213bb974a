use std::path::{Path, PathBuf};

use super::paths::{ensure_settings_dir, get_settings_dir};
use crate::kernel::services::ports::settings::Settings;

const SETTINGS_FILE: &str = "setting.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_settings_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Writes a default settings file on first run; an existing one is left as is.
pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = ensure_settings_dir()?.join(SETTINGS_FILE);
    if path.exists() {
        return Ok(path);
    }
    let defaults = serde_json::to_string_pretty(&Settings::default()).map_err(std::io::Error::other)?;
    std::fs::write(&path, defaults)?;
    tracing::info!(path = %path.display(), "default settings written");
    Ok(path)
}

pub fn load_settings() -> Option<Settings> {
    load_settings_from(&get_settings_path()?)
}

/// `None` when the file is missing or unreadable; invalid JSON is logged.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&data)
        .inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "settings file is not valid json");
        })
        .ok()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;

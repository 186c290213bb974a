//! 数据与日志路径管理
//!
//! 跨平台的应用数据目录：
//! - macOS: ~/Library/Application Support/webcode/{storage,logs}
//! - Linux: ~/.local/share/webcode/{storage,logs}
//! - Windows: %APPDATA%\webcode\{storage,logs}
//!
//! 设置文件放在缓存目录下的 `.webcode/`。

use std::path::PathBuf;

const APP_NAME: &str = "webcode";
const STORAGE_DIR: &str = "storage";
const LOG_DIR: &str = "logs";
const SETTINGS_DIR: &str = ".webcode";

/// 获取应用数据目录
pub fn get_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs_path_macos()
    }

    #[cfg(target_os = "linux")]
    {
        dirs_path_linux()
    }

    #[cfg(target_os = "windows")]
    {
        dirs_path_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(target_os = "macos")]
fn dirs_path_macos() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_NAME)
    })
}

#[cfg(target_os = "linux")]
fn dirs_path_linux() -> Option<PathBuf> {
    // 优先使用 XDG_DATA_HOME，否则使用 ~/.local/share
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg).join(APP_NAME))
    } else {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
    }
}

#[cfg(target_os = "windows")]
fn dirs_path_windows() -> Option<PathBuf> {
    std::env::var("APPDATA")
        .ok()
        .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// 获取设置目录（缓存目录下的 `.webcode`）
pub fn get_settings_dir() -> Option<PathBuf> {
    cache_root().map(|p| p.join(SETTINGS_DIR))
}

#[cfg(target_os = "macos")]
fn cache_root() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join("Library/Caches"))
}

#[cfg(target_os = "linux")]
fn cache_root() -> Option<PathBuf> {
    match std::env::var("XDG_CACHE_HOME") {
        Ok(xdg) => Some(PathBuf::from(xdg)),
        Err(_) => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache")),
    }
}

#[cfg(target_os = "windows")]
fn cache_root() -> Option<PathBuf> {
    std::env::var("LOCALAPPDATA")
        .or_else(|_| std::env::var("APPDATA"))
        .ok()
        .map(PathBuf::from)
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn cache_root() -> Option<PathBuf> {
    None
}

/// 获取持久化状态目录
pub fn get_storage_dir() -> Option<PathBuf> {
    get_data_dir().map(|p| p.join(STORAGE_DIR))
}

/// 获取日志目录路径
pub fn get_log_dir() -> Option<PathBuf> {
    get_data_dir().map(|p| p.join(LOG_DIR))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {what} directory"),
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// 确保存储目录存在；`override_dir` 来自设置文件
pub fn ensure_data_dir(override_dir: Option<PathBuf>) -> std::io::Result<PathBuf> {
    ensure_dir(override_dir.or_else(get_storage_dir), "storage")
}

/// 确保日志目录存在
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

/// 确保设置目录存在
pub fn ensure_settings_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_settings_dir(), "settings")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;

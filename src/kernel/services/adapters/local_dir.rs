//! 本地目录句柄：基于 tokio::fs 的 DirectoryHandle 实现

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::kernel::services::ports::directory::{
    DirectoryHandle, EntryKind, HandleEntry, HandleError,
};

#[derive(Debug, Clone)]
pub struct LocalDirectoryHandle {
    path: PathBuf,
    name: String,
    ignore: Arc<[String]>,
}

impl LocalDirectoryHandle {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "root".to_string());
        Self {
            path,
            name,
            ignore: Arc::from(Vec::new()),
        }
    }

    /// Entry names skipped by `values`, at every depth.
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = Arc::from(ignore);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|n| n == name)
    }
}

impl DirectoryHandle for LocalDirectoryHandle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn values(&self) -> Result<Vec<HandleEntry>, HandleError> {
        let mut read_dir = tokio::fs::read_dir(&self.path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = read_dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(dir = %self.path.display(), "skipping entry with non utf-8 name");
                continue;
            };
            if self.is_ignored(&name) {
                continue;
            }

            // follows symlinks; dangling links are dropped
            let kind = match tokio::fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_dir() => EntryKind::Directory,
                Ok(meta) if meta.is_file() => EntryKind::File,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            entries.push(HandleEntry { kind, name });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn get_directory_handle(&self, name: &str) -> Result<Self, HandleError> {
        let path = self.path.join(name);
        let meta = tokio::fs::metadata(&path).await?;
        if !meta.is_dir() {
            return Err(HandleError::NotFound(name.to_string()));
        }
        Ok(Self {
            path,
            name: name.to_string(),
            ignore: Arc::clone(&self.ignore),
        })
    }

    async fn read_file_text(&self, name: &str) -> Result<String, HandleError> {
        let bytes = tokio::fs::read(self.path.join(name)).await?;
        String::from_utf8(bytes).map_err(|_| HandleError::NotText(name.to_string()))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/local_dir.rs"]
mod tests;

//! 外部目录导入
//!
//! Walks a `DirectoryHandle` into a scratch tree and swaps it in only when the
//! walk is done. The caller's `&mut VfsTree` stays borrowed across every await,
//! so nothing else can touch the tree mid-import.

use thiserror::Error;

use crate::kernel::services::ports::directory::{DirectoryHandle, EntryKind, HandleEntry, HandleError};
use crate::models::path;
use crate::models::VfsTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub root_name: String,
    pub files: usize,
    pub directories: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl ImportReport {
    fn skip(&mut self, path: String, reason: impl ToString) {
        let reason = reason.to_string();
        tracing::warn!(path = %path, reason = %reason, "import entry skipped");
        self.skipped.push(SkippedEntry { path, reason });
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot list {name}: {source}")]
    RootUnreadable {
        name: String,
        #[source]
        source: HandleError,
    },
}

/// Replaces the whole tree with the contents of `handle`.
///
/// Entry failures are skipped and reported; only an unreadable root aborts,
/// in which case `tree` is left as it was.
pub async fn import_directory<H: DirectoryHandle>(
    tree: &mut VfsTree,
    handle: H,
) -> Result<ImportReport, ImportError> {
    let root_name = handle.name().to_string();
    let root_entries = handle
        .values()
        .await
        .map_err(|source| ImportError::RootUnreadable {
            name: root_name.clone(),
            source,
        })?;

    let mut staged = VfsTree::with_root_name(&root_name);
    let mut report = ImportReport {
        root_name,
        ..ImportReport::default()
    };

    let mut pending: Vec<(H, String, Vec<HandleEntry>)> =
        vec![(handle, path::ROOT.to_string(), root_entries)];

    while let Some((dir, dir_path, entries)) = pending.pop() {
        for entry in entries {
            let entry_path = path::join(&dir_path, &entry.name);
            match entry.kind {
                EntryKind::File => {
                    let text = match dir.read_file_text(&entry.name).await {
                        Ok(text) => text,
                        Err(e) => {
                            report.skip(entry_path, e);
                            continue;
                        }
                    };
                    match staged.create_file(&dir_path, &entry.name, text) {
                        Ok(_) => report.files += 1,
                        Err(e) => report.skip(entry_path, e),
                    }
                }
                EntryKind::Directory => {
                    let sub = match dir.get_directory_handle(&entry.name).await {
                        Ok(sub) => sub,
                        Err(e) => {
                            report.skip(entry_path, e);
                            continue;
                        }
                    };
                    let children = match sub.values().await {
                        Ok(children) => children,
                        Err(e) => {
                            report.skip(entry_path, e);
                            continue;
                        }
                    };
                    match staged.create_directory(&dir_path, &entry.name) {
                        Ok(created) => {
                            report.directories += 1;
                            pending.push((sub, created, children));
                        }
                        Err(e) => report.skip(entry_path, e),
                    }
                }
            }
        }
    }

    tree.replace_root(staged);
    tracing::info!(
        root = %report.root_name,
        files = report.files,
        directories = report.directories,
        skipped = report.skipped.len(),
        "directory imported"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/import.rs"]
mod tests;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleEntry {
    pub kind: EntryKind,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not valid utf-8: {0}")]
    NotText(String),
}

/// A directory the user granted access to. Every call may suspend.
#[allow(async_fn_in_trait)]
pub trait DirectoryHandle: Sized {
    fn name(&self) -> &str;

    /// Entries in enumeration order.
    async fn values(&self) -> Result<Vec<HandleEntry>, HandleError>;

    async fn get_directory_handle(&self, name: &str) -> Result<Self, HandleError>;

    async fn read_file_text(&self, name: &str) -> Result<String, HandleError>;
}

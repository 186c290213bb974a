use thiserror::Error;

use super::editor::TabError;
use super::import::ImportError;
use super::runner::RunnerError;
use crate::models::VfsError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Vfs(#[from] VfsError),

    #[error(transparent)]
    Tab(#[from] TabError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("not a file: {0}")]
    NotAFile(String),
}

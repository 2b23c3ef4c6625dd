//! Error types for store operations

/// Errors that can occur while loading, saving, or backing up a table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("table parse error")]
    Json(#[from] serde_json::Error),

    #[error("invalid backup directory: {0}")]
    BackupDir(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

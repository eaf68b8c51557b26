use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot root: {0}")]
    InvalidRoot(String),
}

impl SnapshotError {
    pub fn invalid_root(message: impl Into<String>) -> Self {
        Self::InvalidRoot(message.into())
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed knowledge base at {}: {reason}", path.display())]
    Storage { path: PathBuf, reason: String },

    #[error("Episode not found: {id}")]
    NotFound { id: String },

    #[error("Invalid episode: {0}")]
    InvalidEpisode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn storage(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Storage {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

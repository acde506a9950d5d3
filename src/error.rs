//! Error Types
//!
//! Remote calls fail with one undifferentiated `RemoteFailure`; the other
//! errors are local (startup config, malformed reorder payloads).

use thiserror::Error;

use crate::models::SongId;

/// Result type for remote store operations
pub type RemoteResult<T> = Result<T, RemoteFailure>;

/// Any failed remote call, carrying only a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteFailure {
    message: String,
}

impl RemoteFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for RemoteFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config element #{0} not found")]
    Missing(String),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field `{0}` must not be empty")]
    Empty(&'static str),
}

/// Rejected reorder payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("song {0} appears more than once")]
    Duplicate(SongId),
    #[error("song {0} is not in the list")]
    Unknown(SongId),
    #[error("song {0} is missing from the new order")]
    Missing(SongId),
}

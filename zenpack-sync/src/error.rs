//! Error types for the sync layer.

use crate::state::Activity;
use thiserror::Error;
use zenpack_model::ModelError;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while loading or saving packs.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No credential was supplied; no request was sent.
    #[error("missing credential: a GitHub token is required")]
    MissingCredential,

    /// The store rejected the credential.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The revision token was stale; the write was not applied.
    #[error("revision conflict: {0}")]
    Conflict(String),

    /// Network failure or unexpected response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The transport payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The version marker does not hold a base-10 integer.
    #[error("invalid version marker: {0:?}")]
    InvalidVersion(String),

    /// Another operation on the same resource is in flight.
    #[error("{path} is busy ({activity})")]
    Busy { path: String, activity: Activity },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Pack parsing, shape or edit error.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl SyncError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, SyncError::Conflict(_))
    }

    /// Returns true when repeating the same action unchanged may succeed.
    /// A conflict needs a reload first, so it is not retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Transport(_) | SyncError::Busy { .. })
    }
}

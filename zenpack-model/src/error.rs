//! Error types for the pack model.

use crate::pack::LevelId;
use thiserror::Error;

/// Result type alias using the model's error type.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while parsing, normalizing or editing a pack.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The payload is not valid JSON text.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON is valid but does not have the shape of a pack.
    #[error("unexpected pack shape: {0}")]
    Shape(String),

    #[error("level {0} not found")]
    LevelNotFound(LevelId),

    #[error("entry index {index} out of range for level {level_id} ({len} entries)")]
    IndexOutOfRange {
        level_id: LevelId,
        index: usize,
        len: usize,
    },

    #[error("level {0} already exists")]
    DuplicateLevel(LevelId),

    /// Level ids start at 1.
    #[error("invalid level id: {0}")]
    InvalidLevelId(LevelId),

    #[error("unknown entry field: {0}")]
    UnknownField(String),
}

//! Transport encoding for file content.
//!
//! The contents API carries file bytes as standard padded base64, wrapped
//! with newlines. Decoding strips the whitespace and validates UTF-8.

use crate::error::{SyncError, SyncResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Decodes transport text into UTF-8 text.
pub fn decode(transport: &str) -> SyncResult<String> {
    let compact: String = transport
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| SyncError::Decode(format!("invalid base64: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|e| SyncError::Decode(format!("content is not valid UTF-8: {e}")))
}

/// Encodes UTF-8 text as unwrapped transport text.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

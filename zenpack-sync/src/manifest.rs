//! Pack manifest: the list of pack files available for a language.

use crate::error::SyncResult;
use serde::{Deserialize, Serialize};

/// `{ "Packs": ["pack_1.json", ...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Packs", default)]
    pub packs: Vec<String>,
}

impl Manifest {
    pub fn parse(text: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Manifest listing only `pack_name`, used when none is published.
    pub fn single(pack_name: impl Into<String>) -> Self {
        Self {
            packs: vec![pack_name.into()],
        }
    }
}

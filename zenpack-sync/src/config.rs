//! Configuration for the remote store and the sync engine.

use crate::session::PackLocation;
use serde::{Deserialize, Serialize};

/// GitHub contents API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch read from and committed to.
    pub branch: String,
    /// Base URL for the GitHub API (e.g. `https://api.github.com`).
    pub api_base_url: String,
    /// User-Agent header; GitHub rejects requests without one.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: "balruben-cpu".to_string(),
            repo: "Zen_Data".to_string(),
            branch: "main".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            user_agent: format!("zenpack/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 60,
        }
    }
}

/// Resource layout and commit settings for the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Language directory used when none is given.
    pub language: String,
    /// Pack file used when none is given or the manifest is missing.
    pub default_pack: String,
    /// Manifest file name inside each language directory.
    pub manifest_file: String,
    /// Path of the version marker, relative to the repository root.
    pub version_path: String,
    /// Appended to pack commit messages ("Update en/pack_1.json via <tag>").
    pub commit_tag: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            default_pack: "pack_1.json".to_string(),
            manifest_file: "manifest.json".to_string(),
            version_path: "version.txt".to_string(),
            commit_tag: "zenpack".to_string(),
        }
    }
}

impl SyncConfig {
    /// Path of the manifest for a language.
    pub fn manifest_path(&self, language: &str) -> String {
        format!("{language}/{}", self.manifest_file)
    }

    /// Location of the default pack in the default language.
    pub fn default_location(&self) -> PackLocation {
        PackLocation::new(&self.language, &self.default_pack)
    }
}

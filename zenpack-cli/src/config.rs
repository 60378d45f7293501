//! # Configuration
//!
//! Resolved in priority order:
//! 1. **Command line / environment**: `--owner`, `--repo`, `--language`, ...
//! 2. **Config file**: JSON given by `--config` or `ZENPACK_CONFIG`
//! 3. **Compiled defaults**: [`GitHubConfig::default`], [`SyncConfig::default`]
//!
//! ```json
//! {
//!   "github": { "owner": "balruben-cpu", "repo": "Zen_Data", "branch": "main" },
//!   "sync": { "language": "en", "default_pack": "pack_1.json" }
//! }
//! ```

use crate::args::GlobalArgs;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use zenpack_sync::{GitHubConfig, PackLocation, SyncConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZenConfig {
    pub github: GitHubConfig,
    pub sync: SyncConfig,
}

impl ZenConfig {
    /// Reads a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the config file named by `args` (if any) and applies the
    /// command-line overrides.
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, args: &GlobalArgs) {
        let github = &mut self.github;
        override_with(&mut github.owner, &args.owner);
        override_with(&mut github.repo, &args.repo);
        override_with(&mut github.branch, &args.branch);
        override_with(&mut github.api_base_url, &args.api_url);
        override_with(&mut self.sync.language, &args.language);
        override_with(&mut self.sync.default_pack, &args.pack);
    }

    /// The pack the command operates on.
    pub fn location(&self) -> PackLocation {
        self.sync.default_location()
    }
}

fn override_with(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

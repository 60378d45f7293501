//! Status reporting for user-facing progress and errors.

use std::fmt;
use tracing::{info, warn};

/// Progress and outcome of a sync action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Fetching { path: String },
    Loaded { path: String, levels: usize },
    Syncing { path: String },
    Synced { path: String },
    VersionBumped { version: u64 },
    /// Version bump failed after a successful pack write.
    VersionFailed { message: String },
    Failed { action: &'static str, message: String },
}

impl SyncStatus {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SyncStatus::VersionFailed { .. } | SyncStatus::Failed { .. }
        )
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Fetching { path } => write!(f, "Fetching {path}..."),
            SyncStatus::Loaded { path, levels } => write!(f, "Loaded {path} ({levels} levels)"),
            SyncStatus::Syncing { path } => write!(f, "Syncing {path}..."),
            SyncStatus::Synced { path } => write!(f, "{path} synced successfully"),
            SyncStatus::VersionBumped { version } => write!(f, "Version bump to {version} complete"),
            SyncStatus::VersionFailed { message } => write!(f, "Version update failed: {message}"),
            SyncStatus::Failed { action, message } => write!(f, "{action} error: {message}"),
        }
    }
}

/// Receives status updates.
pub trait StatusSink: Send + Sync {
    fn report(&self, status: &SyncStatus);
}

/// Sink that writes statuses to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn report(&self, status: &SyncStatus) {
        if status.is_error() {
            warn!("{}", status);
        } else {
            info!("{}", status);
        }
    }
}

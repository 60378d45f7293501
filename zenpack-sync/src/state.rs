//! Per-resource busy/idle tracking.
//!
//! Each remote path is either idle or has exactly one operation in flight.
//! Starting a second operation on a busy path fails with
//! [`SyncError::Busy`] rather than interleaving with the first.

use crate::error::{SyncError, SyncResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// What a busy resource is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Fetching,
    Writing,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Fetching => f.write_str("fetching"),
            Activity::Writing => f.write_str("writing"),
        }
    }
}

/// Busy state of every resource with an operation in flight.
///
/// Idle resources have no entry.
#[derive(Debug, Default)]
pub struct ResourceGuards {
    active: Mutex<HashMap<String, Activity>>,
}

impl ResourceGuards {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Activity>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current activity on `path`, or `None` when idle.
    pub fn activity(&self, path: &str) -> Option<Activity> {
        self.lock().get(path).copied()
    }

    pub fn is_idle(&self, path: &str) -> bool {
        self.activity(path).is_none()
    }

    /// Paths with an operation in flight.
    pub fn busy_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Moves `path` from idle to `activity`.
    ///
    /// The returned guard moves the path back to idle when dropped.
    pub fn begin(self: &Arc<Self>, path: &str, activity: Activity) -> SyncResult<ResourceGuard> {
        let mut active = self.lock();
        if let Some(current) = active.get(path) {
            return Err(SyncError::Busy {
                path: path.to_string(),
                activity: *current,
            });
        }
        active.insert(path.to_string(), activity);
        debug!("{} -> {}", path, activity);

        Ok(ResourceGuard {
            guards: Arc::clone(self),
            path: path.to_string(),
        })
    }
}

/// An in-flight operation on one resource.
#[derive(Debug)]
pub struct ResourceGuard {
    guards: Arc<ResourceGuards>,
    path: String,
}

impl ResourceGuard {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Switches the activity of a held resource, e.g. from fetching to
    /// writing in a read-modify-write cycle.
    pub fn advance(&self, activity: Activity) {
        self.guards.lock().insert(self.path.clone(), activity);
        debug!("{} -> {}", self.path, activity);
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        self.guards.lock().remove(&self.path);
        debug!("{} -> idle", self.path);
    }
}

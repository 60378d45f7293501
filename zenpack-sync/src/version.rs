//! Version marker sync.
//!
//! The version marker is a plain-text file holding a base-10 integer.
//! Downstream consumers poll it to learn that pack data changed, so it is
//! bumped after every successful pack write.

use crate::codec;
use crate::error::{SyncError, SyncResult};
use crate::state::{Activity, ResourceGuards};
use crate::store::{Credential, RemoteStore, RevisionToken};
use std::sync::Arc;
use tracing::{debug, info};

/// Parses the marker's content.
pub fn parse_version(text: &str) -> SyncResult<u64> {
    let trimmed = text.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| SyncError::InvalidVersion(trimmed.to_string()))
}

/// Read-increment-write cycle on the version marker.
pub struct VersionCounter {
    store: Arc<dyn RemoteStore>,
    path: String,
    guards: Arc<ResourceGuards>,
}

impl VersionCounter {
    pub fn new(store: Arc<dyn RemoteStore>, path: impl Into<String>) -> Self {
        Self::with_guards(store, path, Arc::new(ResourceGuards::new()))
    }

    /// Creates a counter sharing busy state with other users of the store.
    pub fn with_guards(
        store: Arc<dyn RemoteStore>,
        path: impl Into<String>,
        guards: Arc<ResourceGuards>,
    ) -> Self {
        Self {
            store,
            path: path.into(),
            guards,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the current version and its revision. A missing marker reads as
    /// version 0 with no revision.
    async fn read(&self, credential: &Credential) -> SyncResult<(u64, Option<RevisionToken>)> {
        match self.store.fetch_resource(&self.path, credential).await {
            Ok(file) => {
                let version = parse_version(&codec::decode(&file.raw_text)?)?;
                Ok((version, Some(file.revision)))
            }
            Err(SyncError::NotFound(_)) => {
                debug!("Version marker {} not found, starting from 0", self.path);
                Ok((0, None))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the current version without changing it.
    pub async fn current(&self, credential: &Credential) -> SyncResult<u64> {
        let _guard = self.guards.begin(&self.path, Activity::Fetching)?;
        Ok(self.read(credential).await?.0)
    }

    /// Increments the marker and returns the new version.
    ///
    /// The write presents the revision just read, so a concurrent bump by
    /// another writer surfaces as `Conflict`. Nothing is retried.
    pub async fn bump(&self, credential: &Credential) -> SyncResult<u64> {
        credential.secret()?;
        let guard = self.guards.begin(&self.path, Activity::Fetching)?;

        let (current, revision) = self.read(credential).await?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| SyncError::InvalidVersion(current.to_string()))?;

        guard.advance(Activity::Writing);
        self.store
            .write_resource(
                &self.path,
                &codec::encode(&next.to_string()),
                revision.as_ref(),
                &format!("Update version to {next}"),
                credential,
            )
            .await?;

        info!("Version marker {} bumped to {}", self.path, next);
        Ok(next)
    }
}

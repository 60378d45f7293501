//! Pack sync engine: load and save against a remote store.
//!
//! Load: fetch → decode → parse → normalize → session.
//! Save: denormalize → encode → conditional write with the session token →
//! version bump. The bump is a separate read-increment-write cycle that only
//! runs after the pack write succeeded, and its failure does not fail the
//! save.

use crate::codec;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::manifest::Manifest;
use crate::session::{PackLocation, PackSession};
use crate::state::{Activity, ResourceGuards};
use crate::status::{StatusSink, SyncStatus, TracingStatus};
use crate::store::{Credential, RemoteStore, RevisionToken};
use crate::version::VersionCounter;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zenpack_model::{PackDocument, parse_pack, to_pretty_json};

/// Result of a successful pack save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// New pack revision, already stored in the session.
    pub revision: RevisionToken,
    /// New version marker value, if the bump succeeded.
    pub version: Option<u64>,
    /// Why the bump failed, if it did.
    pub version_error: Option<String>,
}

/// Loads and saves packs.
pub struct PackSync {
    store: Arc<dyn RemoteStore>,
    config: SyncConfig,
    status: Arc<dyn StatusSink>,
    guards: Arc<ResourceGuards>,
}

impl PackSync {
    /// Creates an engine reporting status to the log.
    pub fn new(store: Arc<dyn RemoteStore>, config: SyncConfig) -> Self {
        Self::with_status(store, config, Arc::new(TracingStatus))
    }

    /// Creates an engine reporting status to `status`.
    pub fn with_status(
        store: Arc<dyn RemoteStore>,
        config: SyncConfig,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            store,
            config,
            status,
            guards: Arc::new(ResourceGuards::new()),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Busy state of the resources this engine touches.
    pub fn guards(&self) -> &Arc<ResourceGuards> {
        &self.guards
    }

    /// Counter for the configured version marker, sharing this engine's
    /// busy state.
    pub fn version_counter(&self) -> VersionCounter {
        VersionCounter::with_guards(
            Arc::clone(&self.store),
            self.config.version_path.clone(),
            Arc::clone(&self.guards),
        )
    }

    fn fail<T>(&self, action: &'static str, error: SyncError) -> SyncResult<T> {
        self.status.report(&SyncStatus::Failed {
            action,
            message: error.to_string(),
        });
        Err(error)
    }

    // ── Load ─────────────────────────────────────────────────────

    async fn fetch_document(
        &self,
        location: &PackLocation,
        credential: &Credential,
    ) -> SyncResult<(PackDocument, RevisionToken)> {
        let path = location.path();
        let _guard = self.guards.begin(&path, Activity::Fetching)?;
        self.status.report(&SyncStatus::Fetching { path: path.clone() });

        let file = self.store.fetch_resource(&path, credential).await?;
        let text = codec::decode(&file.raw_text)?;
        let pack = parse_pack(&text)?;

        debug!("Fetched {} at revision {}", path, file.revision);
        Ok((PackDocument::new(pack), file.revision))
    }

    /// Fetches and normalizes a pack, opening a session on it.
    pub async fn load_pack(
        &self,
        location: PackLocation,
        credential: &Credential,
    ) -> SyncResult<PackSession> {
        match self.fetch_document(&location, credential).await {
            Ok((document, revision)) => {
                let levels = document.pack().levels.len();
                self.status.report(&SyncStatus::Loaded {
                    path: location.path(),
                    levels,
                });
                info!("Loaded {} with {} levels", location, levels);
                Ok(PackSession::new(location, document, revision))
            }
            Err(e) => self.fail("Load", e),
        }
    }

    /// Discards local edits and refetches the session's pack.
    pub async fn reload(&self, session: &mut PackSession, credential: &Credential) -> SyncResult<()> {
        match self.fetch_document(session.location(), credential).await {
            Ok((document, revision)) => {
                self.status.report(&SyncStatus::Loaded {
                    path: session.location().path(),
                    levels: document.pack().levels.len(),
                });
                session.replace(document, revision);
                Ok(())
            }
            Err(e) => self.fail("Load", e),
        }
    }

    // ── Save ─────────────────────────────────────────────────────

    async fn write_pack(
        &self,
        session: &mut PackSession,
        credential: &Credential,
    ) -> SyncResult<RevisionToken> {
        credential.secret()?;
        let path = session.location().path();
        let _guard = self.guards.begin(&path, Activity::Writing)?;
        self.status.report(&SyncStatus::Syncing { path: path.clone() });

        let text = to_pretty_json(session.document().pack())?;
        let message = format!("Update {path} via {}", self.config.commit_tag);

        let revision = self
            .store
            .write_resource(
                &path,
                &codec::encode(&text),
                Some(session.revision()),
                &message,
                credential,
            )
            .await?;

        session.set_revision(revision.clone());
        Ok(revision)
    }

    /// Writes the session's pack and bumps the version marker.
    ///
    /// Fails only if the pack write fails. On success the session holds the
    /// new revision; a failed bump is reported in the outcome.
    pub async fn save_pack(
        &self,
        session: &mut PackSession,
        credential: &Credential,
    ) -> SyncResult<SaveOutcome> {
        let revision = match self.write_pack(session, credential).await {
            Ok(revision) => revision,
            Err(e) => return self.fail("Sync", e),
        };
        self.status.report(&SyncStatus::Synced {
            path: session.location().path(),
        });

        let (version, version_error) = match self.bump_version(credential).await {
            Ok(version) => (Some(version), None),
            Err(e) => {
                warn!("Version update failed after saving {}: {}", session.location(), e);
                (None, Some(e.to_string()))
            }
        };

        Ok(SaveOutcome {
            revision,
            version,
            version_error,
        })
    }

    /// Bumps the version marker on its own.
    pub async fn bump_version(&self, credential: &Credential) -> SyncResult<u64> {
        match self.version_counter().bump(credential).await {
            Ok(version) => {
                self.status.report(&SyncStatus::VersionBumped { version });
                Ok(version)
            }
            Err(e) => {
                self.status.report(&SyncStatus::VersionFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    // ── Manifest ─────────────────────────────────────────────────

    async fn fetch_manifest(&self, path: &str, credential: &Credential) -> SyncResult<Manifest> {
        let _guard = self.guards.begin(path, Activity::Fetching)?;
        match self.store.fetch_resource(path, credential).await {
            Ok(file) => Manifest::parse(&codec::decode(&file.raw_text)?),
            Err(SyncError::NotFound(_)) => {
                debug!("No manifest at {}, using {}", path, self.config.default_pack);
                Ok(Manifest::single(&self.config.default_pack))
            }
            Err(e) => Err(e),
        }
    }

    /// Lists the packs published for `language`.
    ///
    /// A missing manifest falls back to the configured default pack.
    pub async fn list_packs(&self, language: &str, credential: &Credential) -> SyncResult<Vec<String>> {
        let path = self.config.manifest_path(language);
        match self.fetch_manifest(&path, credential).await {
            Ok(manifest) => Ok(manifest.packs),
            Err(e) => self.fail("Manifest", e),
        }
    }
}

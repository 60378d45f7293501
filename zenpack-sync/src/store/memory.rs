//! In-process remote store.
//!
//! Applies the same conditional-write rules as the GitHub store, so engine
//! behaviour can be exercised without a network.

use super::remote::{Credential, RemoteFile, RemoteStore, RevisionToken};
use crate::codec;
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A stored resource.
#[derive(Debug, Clone)]
struct StoredFile {
    raw_text: String,
    revision: RevisionToken,
}

#[derive(Debug, Default)]
struct Inner {
    files: HashMap<String, StoredFile>,
    /// Bumped on every write so identical content still gets a fresh token.
    generation: u64,
    commits: Vec<String>,
}

/// Memory-backed remote store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
    accepted_credential: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store accepting any non-empty credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store accepting only the given credential.
    pub fn with_credential(secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::default(),
            accepted_credential: Some(secret.into()),
        }
    }

    /// Stores `text` (transport-encoded on the way in) outside the
    /// conditional-write rules, as another writer would. Returns the new
    /// revision.
    pub async fn seed_text(&self, path: &str, text: &str) -> RevisionToken {
        let mut inner = self.inner.write().await;
        Self::store(&mut inner, path, codec::encode(text))
    }

    /// Returns the decoded content of a resource, if present.
    pub async fn read_text(&self, path: &str) -> Option<String> {
        let inner = self.inner.read().await;
        inner
            .files
            .get(path)
            .and_then(|file| codec::decode(&file.raw_text).ok())
    }

    /// Returns the current revision of a resource, if present.
    pub async fn revision(&self, path: &str) -> Option<RevisionToken> {
        let inner = self.inner.read().await;
        inner.files.get(path).map(|file| file.revision.clone())
    }

    /// Deletes a resource outside the conditional-write rules.
    pub async fn remove(&self, path: &str) -> bool {
        self.inner.write().await.files.remove(path).is_some()
    }

    /// Commit messages of all conditional writes, oldest first.
    pub async fn commits(&self) -> Vec<String> {
        self.inner.read().await.commits.clone()
    }

    fn check_credential(&self, credential: &Credential) -> SyncResult<()> {
        let secret = credential.secret()?;
        match &self.accepted_credential {
            Some(accepted) if accepted != secret => {
                Err(SyncError::Auth("bad credentials".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn store(inner: &mut Inner, path: &str, raw_text: String) -> RevisionToken {
        inner.generation += 1;

        let mut hasher = Sha256::new();
        hasher.update(inner.generation.to_be_bytes());
        hasher.update(path.as_bytes());
        hasher.update(raw_text.as_bytes());
        let revision = RevisionToken::new(hex::encode(&hasher.finalize()[..20]));

        inner.files.insert(
            path.to_string(),
            StoredFile {
                raw_text,
                revision: revision.clone(),
            },
        );
        revision
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    fn provider_name(&self) -> &'static str {
        "Memory"
    }

    async fn fetch_resource(&self, path: &str, credential: &Credential) -> SyncResult<RemoteFile> {
        self.check_credential(credential)?;

        let inner = self.inner.read().await;
        let file = inner
            .files
            .get(path)
            .ok_or_else(|| SyncError::NotFound(path.to_string()))?;

        Ok(RemoteFile {
            raw_text: file.raw_text.clone(),
            revision: file.revision.clone(),
        })
    }

    async fn write_resource(
        &self,
        path: &str,
        raw_text: &str,
        revision: Option<&RevisionToken>,
        message: &str,
        credential: &Credential,
    ) -> SyncResult<RevisionToken> {
        self.check_credential(credential)?;

        let mut inner = self.inner.write().await;
        let current = inner.files.get(path).map(|file| &file.revision);

        match (current, revision) {
            (None, None) => {}
            (Some(current), Some(given)) if current == given => {}
            (Some(_), None) => {
                return Err(SyncError::Conflict(format!(
                    "{path} exists but no matching revision was given"
                )));
            }
            (Some(_), Some(_)) => {
                return Err(SyncError::Conflict(format!(
                    "{path} changed since it was fetched"
                )));
            }
            (None, Some(_)) => {
                return Err(SyncError::Conflict(format!(
                    "{path} was removed since it was fetched"
                )));
            }
        }

        let revision = Self::store(&mut inner, path, raw_text.to_string());
        inner.commits.push(message.to_string());
        debug!("Memory store wrote {} ({})", path, revision);
        Ok(revision)
    }
}

//! Remote store abstraction.
//!
//! A remote store is a versioned file store: every read returns a revision
//! token and every write must present the token of the state it replaces.

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque revision of a remote resource.
///
/// Valid for exactly one following write of the same resource; a successful
/// write returns the token that supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionToken(String);

impl RevisionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bearer credential for the store. May be empty, in which case every
/// store call fails with [`SyncError::MissingCredential`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential, trimming surrounding whitespace.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into().trim().to_string())
    }

    /// Returns the secret, or `MissingCredential` if there is none.
    pub fn secret(&self) -> SyncResult<&str> {
        if self.0.is_empty() {
            Err(SyncError::MissingCredential)
        } else {
            Ok(&self.0)
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

/// Content of a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Transport-encoded content, as returned by the store.
    pub raw_text: String,
    /// Token to present on the next write of this resource.
    pub revision: RevisionToken,
}

/// Versioned file store interface.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns the name of the store provider.
    fn provider_name(&self) -> &'static str;

    /// Reads a resource.
    ///
    /// Fails with `NotFound` if absent, `Auth` if the credential is rejected,
    /// `Transport` otherwise.
    async fn fetch_resource(&self, path: &str, credential: &Credential) -> SyncResult<RemoteFile>;

    /// Writes a resource conditionally.
    ///
    /// `revision` must be the token of the current remote state, or `None` to
    /// create a resource that does not exist yet. A mismatch fails with
    /// `Conflict` and leaves the stored content untouched. On success the
    /// returned token replaces the caller's held token.
    async fn write_resource(
        &self,
        path: &str,
        raw_text: &str,
        revision: Option<&RevisionToken>,
        message: &str,
        credential: &Credential,
    ) -> SyncResult<RevisionToken>;
}

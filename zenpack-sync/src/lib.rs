//! Remote pack synchronization for ZenPack.
//!
//! Pack files live in a GitHub repository and are edited locally. This crate
//! moves them between the two without overwriting someone else's changes.
//!
//! # Architecture
//!
//! - **Codec**: base64 transport encoding of file content
//! - **Store**: versioned file store ([`RemoteStore`]) with GitHub and
//!   in-memory implementations
//! - **State**: per-resource busy/idle guards
//! - **Version**: the version marker bumped after each pack write
//! - **Engine**: load and save orchestration ([`PackSync`])
//!
//! ## Revision tokens
//!
//! Every fetch returns a [`RevisionToken`]; every write presents the token of
//! the state it replaces and receives a new one. The store rejects a write
//! with a stale token with [`SyncError::Conflict`], leaving the remote file
//! as it was. The author reloads and reapplies their edits.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use zenpack_sync::{MemoryStore, PackSync, SyncConfig};
//!
//! let store = Arc::new(MemoryStore::new());
//! let engine = PackSync::new(store, SyncConfig::default());
//! assert_eq!(engine.config().default_pack, "pack_1.json");
//! ```

pub mod codec;
mod config;
mod engine;
mod error;
pub mod manifest;
pub mod session;
pub mod state;
pub mod status;
pub mod store;
pub mod version;

pub use config::{GitHubConfig, SyncConfig};
pub use engine::{PackSync, SaveOutcome};
pub use error::{SyncError, SyncResult};
pub use manifest::Manifest;
pub use session::{PackLocation, PackSession};
pub use state::{Activity, ResourceGuard, ResourceGuards};
pub use status::{StatusSink, SyncStatus, TracingStatus};
pub use store::{
    Credential, GitHubStore, MemoryStore, RemoteFile, RemoteStore, RevisionToken,
};
pub use version::{VersionCounter, parse_version};

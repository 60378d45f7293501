//! Remote stores for pack files.
//!
//! - [`GitHubStore`] talks to the GitHub contents API
//! - [`MemoryStore`] keeps files in process with the same revision rules

pub mod github;
pub mod memory;
pub mod remote;

pub use github::GitHubStore;
pub use memory::MemoryStore;
pub use remote::{Credential, RemoteFile, RemoteStore, RevisionToken};

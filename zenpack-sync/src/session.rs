//! Editing sessions.
//!
//! A [`PackSession`] is the state of one open pack: where it lives, the
//! document being edited and the revision token the next save must present.
//! Sessions are created by [`PackSync::load_pack`](crate::PackSync::load_pack)
//! and replaced when the author switches pack or language.

use crate::store::RevisionToken;
use serde::{Deserialize, Serialize};
use std::fmt;
use zenpack_model::PackDocument;

/// Language and file name of a pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackLocation {
    pub language: String,
    pub pack_name: String,
}

impl PackLocation {
    pub fn new(language: impl Into<String>, pack_name: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            pack_name: pack_name.into(),
        }
    }

    /// Repository-relative path of the pack file.
    pub fn path(&self) -> String {
        format!("{}/{}", self.language, self.pack_name)
    }
}

impl fmt::Display for PackLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pack_name, self.language)
    }
}

/// An open pack.
#[derive(Debug, Clone)]
pub struct PackSession {
    location: PackLocation,
    document: PackDocument,
    revision: RevisionToken,
}

impl PackSession {
    pub(crate) fn new(
        location: PackLocation,
        document: PackDocument,
        revision: RevisionToken,
    ) -> Self {
        Self {
            location,
            document,
            revision,
        }
    }

    pub fn location(&self) -> &PackLocation {
        &self.location
    }

    pub fn document(&self) -> &PackDocument {
        &self.document
    }

    /// Mutable access for edit operations.
    pub fn document_mut(&mut self) -> &mut PackDocument {
        &mut self.document
    }

    /// Token of the remote state this session was loaded from or last saved.
    pub fn revision(&self) -> &RevisionToken {
        &self.revision
    }

    pub(crate) fn set_revision(&mut self, revision: RevisionToken) {
        self.revision = revision;
    }

    /// Replaces document and token after a reload; the cursor is kept.
    pub(crate) fn replace(&mut self, mut document: PackDocument, revision: RevisionToken) {
        document.jump_to_level(self.document.current_level_id());
        self.document = document;
        self.revision = revision;
    }
}

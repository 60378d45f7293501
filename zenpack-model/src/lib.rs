//! Core pack model for ZenPack.
//!
//! Defines the documents a content author edits:
//! - [`Pack`]: an ordered collection of [`Level`]s stored as one JSON file
//! - [`Level`]: a numbered puzzle set with category metadata
//! - [`Entry`]: a single word/riddle puzzle
//!
//! Remote payloads come in two shapes (a bare array of levels, or an object
//! wrapping that array under `Levels`). [`normalize`] accepts both and
//! [`denormalize`] always produces the wrapped form.
//!
//! [`PackDocument`] holds a normalized pack plus the selected-level cursor and
//! exposes the mutation operations used by editors.

mod document;
mod error;
mod normalize;
mod pack;

pub use document::PackDocument;
pub use error::{ModelError, Result};
pub use normalize::{LEVELS_KEY, denormalize, normalize, parse_pack, to_pretty_json};
pub use pack::{
    DEFAULT_GRID_SIZE, Entry, EntryField, Level, LevelId, NEW_ENTRY_WORD, NEW_LEVEL_CATEGORY,
    Pack,
};

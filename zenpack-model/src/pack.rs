use crate::error::ModelError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Level identifier. Positive and unique within a pack.
pub type LevelId = u32;

/// Grid size assigned to newly created levels.
pub const DEFAULT_GRID_SIZE: u32 = 25;

/// Category and subcategory assigned to newly created levels.
pub const NEW_LEVEL_CATEGORY: &str = "New";

/// Word assigned to newly added entries.
pub const NEW_ENTRY_WORD: &str = "NEW";

/// A pack document: the levels of one pack file.
///
/// Keys other than `Levels` are kept in `extra` so that fields written by
/// other tools survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    #[serde(rename = "Levels")]
    pub levels: Vec<Level>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pack {
    /// Returns true when no level ids are out of ascending order.
    pub fn is_sorted(&self) -> bool {
        self.levels
            .windows(2)
            .all(|pair| pair[0].level_id <= pair[1].level_id)
    }
}

/// Reads `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key
/// (`None`), so both are written back as they were read.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A numbered puzzle set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub level_id: LevelId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub subcategory: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_size: Option<Option<u32>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub puzzles: Vec<Entry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Level {
    /// Creates a level with the defaults used by the editor's "create level"
    /// action.
    pub fn new(level_id: LevelId) -> Self {
        Self {
            level_id,
            category: NEW_LEVEL_CATEGORY.to_string(),
            subcategory: Some(Some(NEW_LEVEL_CATEGORY.to_string())),
            grid_size: Some(Some(DEFAULT_GRID_SIZE)),
            puzzles: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Returns the subcategory, or an empty string when absent or null.
    pub fn subcategory(&self) -> &str {
        self.subcategory.as_ref().and_then(|s| s.as_deref()).unwrap_or_default()
    }

    pub fn grid_size(&self) -> Option<u32> {
        self.grid_size.flatten()
    }
}

/// A single word/riddle puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub riddle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub riddle_hard: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Creates an entry with the given word (uppercased) and riddles.
    pub fn new(word: &str, riddle: impl Into<String>, riddle_hard: impl Into<String>) -> Self {
        Self {
            word: word.to_uppercase(),
            riddle: riddle.into(),
            riddle_hard: riddle_hard.into(),
            extra: Map::new(),
        }
    }

    /// Sets one field. Words are always stored uppercased.
    pub fn set_field(&mut self, field: EntryField, value: &str) {
        match field {
            EntryField::Word => self.word = value.to_uppercase(),
            EntryField::Riddle => self.riddle = value.to_string(),
            EntryField::RiddleHard => self.riddle_hard = value.to_string(),
        }
    }

    /// Reads one field.
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Word => &self.word,
            EntryField::Riddle => &self.riddle,
            EntryField::RiddleHard => &self.riddle_hard,
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new(NEW_ENTRY_WORD, "", "")
    }
}

/// Editable fields of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Word,
    Riddle,
    RiddleHard,
}

impl EntryField {
    /// The field's key in the pack JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Word => "word",
            EntryField::Riddle => "riddle",
            EntryField::RiddleHard => "riddle_hard",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(EntryField::Word),
            "riddle" => Ok(EntryField::Riddle),
            "riddle_hard" | "riddle-hard" => Ok(EntryField::RiddleHard),
            other => Err(ModelError::UnknownField(other.to_string())),
        }
    }
}

//! In-memory pack document and its edit operations.

use crate::error::{ModelError, Result};
use crate::pack::{Entry, EntryField, Level, LevelId, Pack};

/// A normalized pack plus the editor's selected-level cursor.
///
/// All mutations keep levels sorted by id and ids unique. The cursor is
/// presentation state and is never written back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PackDocument {
    pack: Pack,
    current_level_id: LevelId,
}

impl PackDocument {
    /// Wraps a pack, sorting its levels if needed.
    pub fn new(mut pack: Pack) -> Self {
        if !pack.is_sorted() {
            pack.levels.sort_by_key(|l| l.level_id);
        }
        Self {
            pack,
            current_level_id: 1,
        }
    }

    /// Returns the underlying pack.
    pub fn pack(&self) -> &Pack {
        &self.pack
    }

    /// Consumes the document, returning the pack.
    pub fn into_pack(self) -> Pack {
        self.pack
    }

    /// Returns the level ids in ascending order.
    pub fn level_ids(&self) -> impl Iterator<Item = LevelId> + '_ {
        self.pack.levels.iter().map(|l| l.level_id)
    }

    pub fn find_level(&self, level_id: LevelId) -> Option<&Level> {
        self.pack.levels.iter().find(|l| l.level_id == level_id)
    }

    fn level_mut(&mut self, level_id: LevelId) -> Result<&mut Level> {
        self.pack
            .levels
            .iter_mut()
            .find(|l| l.level_id == level_id)
            .ok_or(ModelError::LevelNotFound(level_id))
    }

    /// Appends a level with default metadata and re-sorts.
    ///
    /// Fails with [`ModelError::DuplicateLevel`] if the id is taken; the
    /// existing level is left as it was.
    pub fn create_level(&mut self, level_id: LevelId) -> Result<&Level> {
        if level_id == 0 {
            return Err(ModelError::InvalidLevelId(level_id));
        }
        if self.find_level(level_id).is_some() {
            return Err(ModelError::DuplicateLevel(level_id));
        }

        self.pack.levels.push(Level::new(level_id));
        self.pack.levels.sort_by_key(|l| l.level_id);

        self.find_level(level_id)
            .ok_or(ModelError::LevelNotFound(level_id))
    }

    /// Sets one field of one entry. Words are uppercased before storage.
    pub fn update_entry_field(
        &mut self,
        level_id: LevelId,
        index: usize,
        field: EntryField,
        value: &str,
    ) -> Result<()> {
        let level = self.level_mut(level_id)?;
        let len = level.puzzles.len();
        let entry = level
            .puzzles
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfRange {
                level_id,
                index,
                len,
            })?;
        entry.set_field(field, value);
        Ok(())
    }

    /// Appends a placeholder entry and returns its index.
    pub fn add_entry(&mut self, level_id: LevelId) -> Result<usize> {
        let level = self.level_mut(level_id)?;
        level.puzzles.push(Entry::default());
        Ok(level.puzzles.len() - 1)
    }

    /// Removes and returns the entry at `index`.
    pub fn remove_entry(&mut self, level_id: LevelId, index: usize) -> Result<Entry> {
        let level = self.level_mut(level_id)?;
        if index >= level.puzzles.len() {
            return Err(ModelError::IndexOutOfRange {
                level_id,
                index,
                len: level.puzzles.len(),
            });
        }
        Ok(level.puzzles.remove(index))
    }

    pub fn set_level_meta(
        &mut self,
        level_id: LevelId,
        category: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Result<()> {
        let level = self.level_mut(level_id)?;
        level.category = category.into();
        level.subcategory = Some(Some(subcategory.into()));
        Ok(())
    }

    // ── Cursor ───────────────────────────────────────────────────

    pub fn current_level_id(&self) -> LevelId {
        self.current_level_id
    }

    /// The level under the cursor, if it exists yet.
    pub fn current_level(&self) -> Option<&Level> {
        self.find_level(self.current_level_id)
    }

    /// Moves the cursor. Ids below 1 clamp to 1.
    pub fn jump_to_level(&mut self, level_id: LevelId) -> LevelId {
        self.current_level_id = level_id.max(1);
        self.current_level_id
    }

    /// Moves the cursor by `delta`, clamping at 1.
    pub fn nav_level(&mut self, delta: i64) -> LevelId {
        let target = (i64::from(self.current_level_id) + delta).clamp(1, i64::from(LevelId::MAX));
        self.jump_to_level(target as LevelId)
    }
}

impl Default for PackDocument {
    fn default() -> Self {
        Self::new(Pack::default())
    }
}

impl From<Pack> for PackDocument {
    fn from(pack: Pack) -> Self {
        Self::new(pack)
    }
}

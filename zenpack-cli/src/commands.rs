//! Command execution against a pack sync engine.

use crate::args::Command;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::debug;
use zenpack_model::{Level, ModelError, PackDocument};
use zenpack_sync::{Credential, PackLocation, PackSync, SaveOutcome};

/// Runs one command, writing its human-readable output to `out`.
pub async fn run(
    command: &Command,
    engine: &PackSync,
    location: PackLocation,
    credential: &Credential,
    out: &mut impl Write,
) -> Result<()> {
    debug!("Running {:?} on {}", command, location);

    match command {
        Command::Packs => {
            let packs = engine
                .list_packs(&location.language, credential)
                .await
                .with_context(|| format!("Failed to list packs for {}", location.language))?;
            for pack in packs {
                writeln!(out, "{pack}")?;
            }
        }
        Command::Levels => {
            let session = engine.load_pack(location, credential).await?;
            for level in &session.document().pack().levels {
                write_level_line(out, level)?;
            }
        }
        Command::Show { level } => {
            let mut session = engine.load_pack(location, credential).await?;
            session.document_mut().jump_to_level(*level);
            let current = session
                .document()
                .current_level()
                .ok_or(ModelError::LevelNotFound(*level))?;
            write_level(out, current)?;
        }
        Command::BumpVersion => {
            let version = engine
                .bump_version(credential)
                .await
                .context("Failed to update version marker")?;
            writeln!(out, "version {version}")?;
        }
        edit => {
            let outcome = apply_edit(edit, engine, location, credential, out).await?;
            write_outcome(out, &outcome)?;
        }
    }

    Ok(())
}

/// Loads the pack, applies one edit, and saves it.
async fn apply_edit(
    command: &Command,
    engine: &PackSync,
    location: PackLocation,
    credential: &Credential,
    out: &mut impl Write,
) -> Result<SaveOutcome> {
    let mut session = engine.load_pack(location, credential).await?;
    edit_document(command, session.document_mut(), out)?;

    let outcome = engine
        .save_pack(&mut session, credential)
        .await
        .with_context(|| format!("Failed to save {}", session.location()))?;
    Ok(outcome)
}

fn edit_document(command: &Command, document: &mut PackDocument, out: &mut impl Write) -> Result<()> {
    match command {
        Command::CreateLevel { level } => {
            let created = document.create_level(*level)?;
            writeln!(out, "created level {}", created.level_id)?;
        }
        Command::AddEntry { level } => {
            let index = document.add_entry(*level)?;
            writeln!(out, "added entry {index} to level {level}")?;
        }
        Command::SetEntry {
            level,
            index,
            field,
            value,
        } => {
            document.update_entry_field(*level, *index, *field, value)?;
            writeln!(out, "set {field} of entry {index} in level {level}")?;
        }
        Command::RemoveEntry { level, index } => {
            let removed = document.remove_entry(*level, *index)?;
            writeln!(out, "removed entry {index} ({}) from level {level}", removed.word)?;
        }
        Command::SetMeta {
            level,
            category,
            subcategory,
        } => {
            document.set_level_meta(*level, category.as_str(), subcategory.as_str())?;
            writeln!(out, "level {level} is now {category}/{subcategory}")?;
        }
        other => anyhow::bail!("{other:?} is not an edit"),
    }
    Ok(())
}

fn write_level_line(out: &mut impl Write, level: &Level) -> Result<()> {
    writeln!(
        out,
        "{}\t{}/{}\t{} puzzles",
        level.level_id,
        level.category,
        level.subcategory(),
        level.puzzles.len()
    )?;
    Ok(())
}

fn write_level(out: &mut impl Write, level: &Level) -> Result<()> {
    write_level_line(out, level)?;
    for (index, entry) in level.puzzles.iter().enumerate() {
        writeln!(
            out,
            "  [{index}] {} | {} | {}",
            entry.word, entry.riddle, entry.riddle_hard
        )?;
    }
    Ok(())
}

fn write_outcome(out: &mut impl Write, outcome: &SaveOutcome) -> Result<()> {
    writeln!(out, "saved at revision {}", outcome.revision)?;
    match (&outcome.version, &outcome.version_error) {
        (Some(version), _) => writeln!(out, "version {version}")?,
        (None, Some(error)) => writeln!(out, "warning: version not updated: {error}")?,
        (None, None) => {}
    }
    Ok(())
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use zenpack_model::{EntryField, LevelId};

#[derive(Parser, Debug)]
#[command(name = "zenpack")]
#[command(about = "Edit ZenPack puzzle packs stored in a GitHub repository")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// GitHub token with contents read/write access
    #[arg(long, env = "ZEN_GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// JSON config file
    #[arg(long, env = "ZENPACK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Repository owner
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Branch to read and commit to
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// GitHub API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Language directory (e.g. "en")
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Pack file name (e.g. "pack_1.json")
    #[arg(short, long, global = true)]
    pub pack: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the packs published for the language
    Packs,

    /// List the levels of the pack
    Levels,

    /// Show one level and its puzzles
    Show {
        #[arg(long, default_value_t = 1)]
        level: LevelId,
    },

    /// Create a level with default metadata
    CreateLevel { level: LevelId },

    /// Append a placeholder puzzle to a level
    AddEntry { level: LevelId },

    /// Set a puzzle field (word, riddle, riddle_hard)
    SetEntry {
        level: LevelId,
        index: usize,
        field: EntryField,
        value: String,
    },

    /// Delete a puzzle from a level
    RemoveEntry { level: LevelId, index: usize },

    /// Set a level's category and subcategory
    SetMeta {
        level: LevelId,
        category: String,
        subcategory: String,
    },

    /// Increment the version marker without changing any pack
    BumpVersion,
}

impl Command {
    /// Returns true for commands that write the pack.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::CreateLevel { .. }
                | Command::AddEntry { .. }
                | Command::SetEntry { .. }
                | Command::RemoveEntry { .. }
                | Command::SetMeta { .. }
        )
    }
}

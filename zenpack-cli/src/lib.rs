//! Command-line front end for ZenPack.
//!
//! Parses arguments, resolves configuration and runs one editor action per
//! invocation. Mutating actions load the pack, apply the edit and save it
//! back, bumping the version marker.

pub mod args;
pub mod commands;
pub mod config;

pub use args::{Cli, Command, GlobalArgs};
pub use commands::run;
pub use config::ZenConfig;

//! ZenPack command-line editor
//!
//! Loads a puzzle pack from the data repository, applies one edit, and
//! commits it back with the version marker bumped.
//!
//! Usage:
//!   ZEN_GITHUB_TOKEN=... zenpack --language en --pack pack_1.json levels
//!   zenpack set-entry 3 0 word fox

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::sync::Arc;
use tracing::{Level, debug};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zenpack_cli::{Cli, ZenConfig, run};
use zenpack_sync::{Credential, GitHubStore, PackSync};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.global.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = ZenConfig::resolve(&cli.global)?;
    debug!(
        "Using {}/{} on {} ({})",
        config.github.owner, config.github.repo, config.github.branch, config.github.api_base_url
    );

    let store = GitHubStore::new(config.github.clone()).context("Invalid GitHub configuration")?;
    let engine = PackSync::new(Arc::new(store), config.sync.clone());
    let credential = Credential::new(cli.global.token.clone().unwrap_or_default());

    let mut stdout = io::stdout().lock();
    run(&cli.command, &engine, config.location(), &credential, &mut stdout).await
}

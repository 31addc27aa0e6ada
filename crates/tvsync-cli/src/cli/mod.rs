//! CLI for tvsync.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tvsync_core::config;

use commands::{run_check, run_show_config, run_sync};

/// Top-level CLI. With no subcommand, runs `sync`.
#[derive(Debug, Parser)]
#[command(name = "tvsync")]
#[command(
    about = "Mirror a live-TV playlist to disk, rejecting firewall block pages",
    long_about = "Fetches the playlist at $TV_SOURCE_URL (optionally through $DOMESTIC_PROXY), \
                  checks that it looks like a real playlist and writes it to tv/pllive.txt. \
                  Exits non-zero when every attempt failed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Settings file (TOML). Defaults to ~/.config/tvsync/config.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write logs to ~/.local/state/tvsync/tvsync.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch, validate and save the playlist (default).
    Sync {
        /// Write the playlist here instead of the configured output path.
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Run the content check over a local file and print the verdict.
    Check {
        /// Path to the file to check.
        path: PathBuf,
    },

    /// Print the effective settings as TOML.
    Config,
}

impl Cli {
    /// Dispatch. `Ok(false)` means the command ran but did not succeed.
    pub fn run(self) -> Result<bool> {
        let settings = config::load_settings(self.config.as_deref())?;
        tracing::debug!("loaded settings: {:?}", settings);

        match self.command.unwrap_or(CliCommand::Sync { output: None }) {
            CliCommand::Sync { output } => Ok(run_sync(settings, output)),
            CliCommand::Check { path } => run_check(&path),
            CliCommand::Config => {
                run_show_config(&settings)?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests;

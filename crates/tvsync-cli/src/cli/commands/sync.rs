//! `tvsync sync` – fetch, validate and save the playlist.

use std::path::PathBuf;
use tvsync_core::config::Settings;
use tvsync_core::sync::{self, SyncOutcome};

pub fn run_sync(mut settings: Settings, output: Option<PathBuf>) -> bool {
    if let Some(path) = output {
        settings.output_path = path;
    }

    let outcome = sync::sync_from_env(settings);
    if let SyncOutcome::Synced {
        path,
        bytes,
        attempts,
    } = &outcome
    {
        println!(
            "Saved {} bytes to {} (attempt {}).",
            bytes,
            path.display(),
            attempts
        );
    }
    outcome.is_success()
}

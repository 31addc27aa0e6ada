//! `tvsync config` – print effective settings.

use anyhow::Result;
use tvsync_core::config::Settings;

pub fn run_show_config(settings: &Settings) -> Result<()> {
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}

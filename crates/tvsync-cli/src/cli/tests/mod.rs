//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_subcommand_defaults() {
    let cli = parse(&["tvsync"]);
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
    assert!(!cli.log_file);
}

#[test]
fn cli_parse_sync_output() {
    let cli = parse(&["tvsync", "sync", "--output", "/srv/tv/pllive.txt"]);
    match cli.command {
        Some(CliCommand::Sync { output }) => {
            assert_eq!(
                output.as_deref(),
                Some(std::path::Path::new("/srv/tv/pllive.txt"))
            );
        }
        _ => panic!("expected Sync"),
    }
}

#[test]
fn cli_parse_sync_without_output() {
    match parse(&["tvsync", "sync"]).command {
        Some(CliCommand::Sync { output }) => assert!(output.is_none()),
        _ => panic!("expected Sync"),
    }
}

#[test]
fn cli_parse_check() {
    match parse(&["tvsync", "check", "page.html"]).command {
        Some(CliCommand::Check { path }) => {
            assert_eq!(path, std::path::PathBuf::from("page.html"));
        }
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse(&["tvsync", "config", "--config", "/etc/tvsync.toml", "--log-file"]);
    assert!(matches!(cli.command, Some(CliCommand::Config)));
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/tvsync.toml"))
    );
    assert!(cli.log_file);
}

#[test]
fn cli_parse_check_requires_path() {
    assert!(Cli::try_parse_from(["tvsync", "check"]).is_err());
}

#[test]
fn cli_run_with_bad_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    std::fs::write(&cfg, "max_attempts = [").unwrap();
    let cli = parse(&["tvsync", "config", "--config", cfg.to_str().unwrap()]);
    assert!(cli.run().is_err());
}

#[test]
fn cli_run_config_prints_settings() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    std::fs::write(&cfg, "max_attempts = 4\n").unwrap();
    let cli = parse(&["tvsync", "config", "--config", cfg.to_str().unwrap()]);
    assert!(cli.run().unwrap());
}

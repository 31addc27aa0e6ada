//! `tvsync check` – validate a local file.

use anyhow::{Context, Result};
use std::path::Path;
use tvsync_core::validate;

/// Prints the verdict; `Ok(false)` when the content is rejected.
pub fn run_check(path: &Path) -> Result<bool> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content = String::from_utf8_lossy(&data);
    let verdict = validate::validate(&content);
    if verdict.is_valid() {
        println!("{}: valid ({})", path.display(), verdict.reason());
    } else {
        println!("{}: invalid ({})", path.display(), verdict.reason());
    }
    Ok(verdict.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accepts_playlist_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pllive.txt");
        let mut body = String::from("#EXTM3U\n");
        for i in 0..30 {
            body.push_str(&format!("#EXTINF:-1,CCTV-{i}\nrtp://239.3.1.{i}:8000\n"));
        }
        std::fs::write(&path, body).unwrap();
        assert!(run_check(&path).unwrap());
    }

    #[test]
    fn check_rejects_block_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocked.html");
        std::fs::write(&path, format!("<!DOCTYPE html>{}", "机房IP ".repeat(200))).unwrap();
        assert!(!run_check(&path).unwrap());
    }

    #[test]
    fn check_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_check(&dir.path().join("missing.txt")).is_err());
    }
}

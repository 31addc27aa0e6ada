//! Output file lifecycle.
//!
//! The playlist is written to a `.part` sibling, synced, then renamed over the
//! final path, so readers never see a half-written file and each successful
//! run fully replaces the previous one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `pllive.txt` → `pllive.txt.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Replace `final_path` with `content`, creating parent directories as needed.
/// Returns the number of bytes written.
pub fn write_output(final_path: &Path, content: &str) -> io::Result<u64> {
    if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tp = temp_path(final_path);
    let written = write_and_sync(&tp, content.as_bytes());
    if let Err(e) = written {
        let _ = fs::remove_file(&tp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tp, final_path) {
        let _ = fs::remove_file(&tp);
        return Err(e);
    }
    Ok(content.len() as u64)
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

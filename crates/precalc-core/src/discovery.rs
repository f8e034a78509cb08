//! Beatmap file discovery.

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Default beatmap file extension.
pub const DEFAULT_EXTENSION: &str = "osu";

/// Maximum number of unreadable entries reported individually.
const MAX_REPORTED_SKIPS: usize = 10;

/// Recursively collect files with the given extension under `dir`.
///
/// The extension match is case-insensitive. Paths are sorted by file name
/// within each directory so the order is stable between runs. Unreadable
/// subdirectories are skipped, an unreadable `dir` is an error.
pub fn discover_beatmaps(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InputDirNotFound(dir.to_path_buf()));
    }

    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself cannot be listed
            Err(err) if err.depth() == 0 => {
                return Err(Error::InputDirUnreadable {
                    path: dir.to_path_buf(),
                    source: io::Error::from(err),
                });
            }
            Err(err) => {
                if skipped_count < MAX_REPORTED_SKIPS {
                    warn!("Skipping directory entry: {}", err);
                }
                skipped_count += 1;
                continue;
            }
        };

        if entry.file_type().is_file() && matches_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    if skipped_count > MAX_REPORTED_SKIPS {
        warn!(
            "Skipped {} additional directory entries",
            skipped_count - MAX_REPORTED_SKIPS
        );
    }

    Ok(files)
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

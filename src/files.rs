//! Recording-file selection.
//!
//! The cycling app drops date-prefixed `.fit` files into one directory.
//! A processing run picks the files for its date by name pattern and size,
//! and works through them in name order.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

/// Returns the file names under `directory` whose full name matches
/// `pattern` end-to-end, sorted lexicographically.
///
/// `min_size` keeps only files whose size strictly exceeds it. The app
/// emits sub-few-KB keepalive recordings that are not real sessions;
/// filtering them out by size is a heuristic, not a guarantee.
///
/// A missing or unreadable directory, or an invalid pattern, yields an
/// empty result; the caller decides whether zero files is fatal.
pub fn select_recordings(directory: &Path, pattern: &str, min_size: Option<u64>) -> Vec<String> {
    let regex = match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(regex) => regex,
        Err(err) => {
            warn!("invalid recording pattern `{pattern}`: {err}");
            return Vec::new();
        }
    };
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                "cannot read recordings directory {}: {err}",
                directory.display()
            );
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in entries.flatten() {
        // A date-patterned name is ASCII; non-UTF-8 names can't match.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !regex.is_match(&name) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        if let Some(min) = min_size {
            if metadata.len() <= min {
                debug!("skipping {name}: {} bytes, below keepalive cutoff", metadata.len());
                continue;
            }
        }
        names.push(name);
    }
    names.sort();
    names
}

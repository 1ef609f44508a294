//! Stripping position regions from merged documents.
//!
//! Stationary-trainer recordings carry `<Position>` blocks with synthetic
//! coordinates; the upload is cleaner without them. Each start tag pairs
//! with the NEAREST following end tag (non-greedy), so one removal can
//! never swallow unrelated regions. Segment extraction cuts at first/last
//! occurrences instead; the two disciplines stay separate.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

/// A position region plus the whitespace trailing it, so removals don't
/// pile up blank lines.
static POSITION_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<Position>.*?</Position>\s*").expect("position pattern should be valid")
});

/// Errors from sanitizing a document file.
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    #[error("input file does not exist: {path}")]
    MissingInput { path: PathBuf },

    #[error("output directory does not exist: {path}")]
    MissingOutputDir { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Removes every `<Position>…</Position>` region from `text`, markers
/// included. A document without position regions comes back unchanged;
/// applying this twice is a no-op.
pub fn strip_positions(text: &str) -> String {
    POSITION_REGION.replace_all(text, "").into_owned()
}

/// Sanitizes `input` into `output`.
///
/// The cleaned text is written to a temporary file beside `output` and
/// renamed into place, so a failure never leaves a partial document at the
/// final path.
pub fn strip_positions_file(input: &Path, output: &Path) -> Result<(), SanitizeError> {
    if !input.is_file() {
        return Err(SanitizeError::MissingInput {
            path: input.to_path_buf(),
        });
    }
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(SanitizeError::MissingOutputDir {
            path: dir.to_path_buf(),
        });
    }

    let content = fs::read_to_string(input)?;
    let cleaned = strip_positions(&content);

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(cleaned.as_bytes())?;
    tmp.persist(output).map_err(|err| err.error)?;
    info!("stripped position data into {}", output.display());
    Ok(())
}

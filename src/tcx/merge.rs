//! Merging same-day TCX documents into one session.
//!
//! The merged document keeps the first input's head preamble and the last
//! input's tail postamble verbatim, and carries every input's lap regions
//! exactly once, in input order. Joins are plain concatenation: no byte is
//! added or removed beyond what segment extraction already trims.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::segment::{self, MalformedDocument};

/// Errors from merging documents or document files.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("no input documents to merge")]
    NoInputs,

    #[error("input file does not exist: {path}")]
    MissingInput { path: PathBuf },

    #[error("output directory does not exist: {path}")]
    MissingOutputDir { path: PathBuf },

    #[error("document {index} is malformed: {source}")]
    Malformed {
        index: usize,
        source: MalformedDocument,
    },

    #[error("file {path} is malformed: {source}")]
    MalformedFile {
        path: PathBuf,
        source: MalformedDocument,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Merges document texts in input order.
///
/// - zero documents is an error;
/// - a single document is returned byte-identical, bypassing all marker
///   logic;
/// - otherwise the first document keeps its head and loses its tail, the
///   last keeps its tail and loses its head, and interior documents lose
///   both, leaving only lap regions.
pub fn merge_documents(docs: &[String]) -> Result<String, MergeError> {
    match docs {
        [] => Err(MergeError::NoInputs),
        [only] => Ok(only.clone()),
        _ => {
            let last = docs.len() - 1;
            let mut merged = String::new();
            for (index, doc) in docs.iter().enumerate() {
                let part = if index == 0 {
                    segment::through_last_lap(doc)
                } else if index == last {
                    segment::from_first_lap(doc)
                } else {
                    segment::from_first_lap(doc).and_then(segment::through_last_lap)
                }
                .map_err(|source| MergeError::Malformed { index, source })?;
                merged.push_str(part);
            }
            Ok(merged)
        }
    }
}

/// Merges document files into `output`.
///
/// Every input must be an existing regular file and the output directory
/// must already exist; violations abort the merge rather than being
/// skipped. A single input is copied byte-for-byte without reading it.
pub fn merge_files(inputs: &[PathBuf], output: &Path) -> Result<(), MergeError> {
    if inputs.is_empty() {
        return Err(MergeError::NoInputs);
    }
    for path in inputs {
        if !path.is_file() {
            return Err(MergeError::MissingInput { path: path.clone() });
        }
    }
    if let Some(dir) = output.parent() {
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            return Err(MergeError::MissingOutputDir {
                path: dir.to_path_buf(),
            });
        }
    }

    if let [only] = inputs {
        debug!("single input, copying {} verbatim", only.display());
        fs::copy(only, output)?;
        return Ok(());
    }

    let mut docs = Vec::with_capacity(inputs.len());
    for path in inputs {
        docs.push(fs::read_to_string(path)?);
    }
    let merged = merge_documents(&docs).map_err(|err| match err {
        MergeError::Malformed { index, source } => MergeError::MalformedFile {
            path: inputs[index].clone(),
            source,
        },
        other => other,
    })?;
    fs::write(output, merged)?;
    info!("merged {} documents into {}", inputs.len(), output.display());
    Ok(())
}

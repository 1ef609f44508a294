//! Per-date pipeline: select, convert, merge, sanitize, upload.
//!
//! Each requested date runs the same fixed sequence. Merging happens
//! before sanitizing: position regions live inside lap segments, so
//! stripping them first would disturb the text the lap-boundary cuts are
//! made in. Dates run strictly one after another; they share one working
//! directory and one authorization session.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::convert::{Converter, FitToTcx};
use crate::files::select_recordings;
use crate::strava::Uploader;
use crate::tcx;

/// Flags carried from the command line into a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Run the pipeline but skip authorization and upload.
    pub dry_run: bool,
    /// Copy each date's cleaned document into this directory.
    pub keep_dir: Option<PathBuf>,
}

/// Converts, merges, and sanitizes one date's recordings inside
/// `workdir`, returning the path of the cleaned document.
///
/// A recording that fails to convert is skipped with a warning; the date
/// only fails when no recording converts at all.
pub fn process_date(
    converter: &dyn Converter,
    fit_files: &[PathBuf],
    date: NaiveDate,
    workdir: &Path,
) -> Result<PathBuf> {
    let mut tcx_paths = Vec::with_capacity(fit_files.len());
    for fit_path in fit_files {
        let mut tcx_name = PathBuf::from(fit_path.file_name().unwrap_or_default());
        tcx_name.set_extension("tcx");
        let tcx_path = workdir.join(tcx_name);
        match converter.convert(fit_path, &tcx_path) {
            Ok(()) => tcx_paths.push(tcx_path),
            Err(err) => warn!(
                "skipping {}: conversion failed: {err}",
                fit_path.display()
            ),
        }
    }
    if tcx_paths.is_empty() {
        bail!("none of the {} recording(s) for {date} could be converted", fit_files.len());
    }

    let merged_path = workdir.join(format!("merged_{date}.tcx"));
    tcx::merge_files(&tcx_paths, &merged_path)
        .with_context(|| format!("merging recordings for {date}"))?;

    let cleaned_path = workdir.join(format!("cleaned_{date}.tcx"));
    tcx::strip_positions_file(&merged_path, &cleaned_path)
        .with_context(|| format!("sanitizing merged document for {date}"))?;

    Ok(cleaned_path)
}

/// Runs the pipeline for each date in turn.
///
/// A failure is scoped to its date: it is logged and the remaining dates
/// still run. The whole run fails only when every date failed. The
/// temporary working directory is removed on every exit path.
pub fn run(config: &Config, dates: &[NaiveDate], options: &RunOptions) -> Result<()> {
    let converter = FitToTcx::from_config(&config.converter);
    if !converter.is_available() {
        warn!(
            "converter `{}` not found in PATH; conversions will fail",
            config.converter.command
        );
    }
    let uploader = (!options.dry_run)
        .then(|| Uploader::new(&config.strava, &config.upload));
    let workdir = tempfile::tempdir().context("creating the working directory")?;

    let mut failed = 0usize;
    for date in dates {
        match run_date(config, &converter, uploader.as_ref(), *date, workdir.path(), options) {
            Ok(()) => {}
            Err(err) => {
                error!("{date}: {err:#}");
                failed += 1;
            }
        }
    }

    if failed == dates.len() && !dates.is_empty() {
        bail!("no date could be processed");
    }
    if failed > 0 {
        warn!("{failed} of {} date(s) failed", dates.len());
    }
    Ok(())
}

fn run_date(
    config: &Config,
    converter: &dyn Converter,
    uploader: Option<&Uploader>,
    date: NaiveDate,
    workdir: &Path,
    options: &RunOptions,
) -> Result<()> {
    let pattern = format!(
        r"{date}.*\.{}",
        regex::escape(&config.recordings.extension)
    );
    let names = select_recordings(
        &config.recordings.directory,
        &pattern,
        Some(config.recordings.min_size_bytes),
    );
    if names.is_empty() {
        info!("{date}: no recordings found, nothing to do");
        return Ok(());
    }
    info!("{date}: processing {} recording(s)", names.len());

    let fit_files: Vec<PathBuf> = names
        .iter()
        .map(|name| config.recordings.directory.join(name))
        .collect();
    let cleaned = process_date(converter, &fit_files, date, workdir)?;

    if let Some(keep_dir) = &options.keep_dir {
        fs::create_dir_all(keep_dir)
            .with_context(|| format!("creating {}", keep_dir.display()))?;
        let target = keep_dir.join(format!("cleaned_{date}.tcx"));
        fs::copy(&cleaned, &target)
            .with_context(|| format!("copying cleaned document to {}", target.display()))?;
        info!("{date}: kept cleaned document at {}", target.display());
    }

    match uploader {
        Some(uploader) => {
            let activity = uploader
                .upload(&cleaned)
                .with_context(|| format!("uploading activity for {date}"))?;
            info!("{date}: activity created at {}", activity.url());
            uploader.open_activity(&activity);
        }
        None => info!("{date}: dry run, skipping upload"),
    }
    Ok(())
}

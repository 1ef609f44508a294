//! End-to-end pipeline with a stub converter

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rideup::convert::{ConvertError, Converter};
use rideup::pipeline::process_date;
use rideup::tcx::count_laps;

use crate::support::{doc_head, single_lap_doc, DOC_TAIL};

/// Stands in for the external tool: the "recordings" already hold TCX
/// text, so conversion is a copy.
struct StubConverter;

impl Converter for StubConverter {
    fn is_available(&self) -> bool {
        true
    }

    fn convert(&self, fit_path: &Path, tcx_path: &Path) -> Result<(), ConvertError> {
        fs::copy(fit_path, tcx_path)?;
        Ok(())
    }
}

/// Fails for any recording whose name contains "bad".
struct FlakyConverter;

impl Converter for FlakyConverter {
    fn is_available(&self) -> bool {
        true
    }

    fn convert(&self, fit_path: &Path, tcx_path: &Path) -> Result<(), ConvertError> {
        if fit_path.to_string_lossy().contains("bad") {
            return Err(ConvertError::ExitCode {
                code: 1,
                stderr: "unreadable recording".to_string(),
            });
        }
        fs::copy(fit_path, tcx_path)?;
        Ok(())
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn write_recordings(dir: &Path, specs: &[(&str, &str, u32)]) -> Vec<PathBuf> {
    specs
        .iter()
        .map(|(name, id, cadence)| {
            let path = dir.join(name);
            fs::write(&path, single_lap_doc(id, *cadence)).unwrap();
            path
        })
        .collect()
}

#[test]
fn three_recordings_become_one_clean_session() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    let fit_files = write_recordings(
        dir.path(),
        &[
            ("2024-03-01_a.fit", "first", 80),
            ("2024-03-01_b.fit", "second", 85),
            ("2024-03-01_c.fit", "third", 90),
        ],
    );

    let cleaned = process_date(&StubConverter, &fit_files, date(), workdir.path()).unwrap();
    assert_eq!(
        cleaned.file_name().unwrap().to_str().unwrap(),
        "cleaned_2024-03-01.tcx"
    );

    let text = fs::read_to_string(&cleaned).unwrap();
    assert_eq!(count_laps(&text), 3);
    assert_eq!(text.matches("<Position>").count(), 0);
    assert!(text.starts_with(&doc_head("first")));
    assert!(text.ends_with(DOC_TAIL));

    // The intermediate merged document is there too, and still carries
    // the position regions the cleaned one lost.
    let merged = fs::read_to_string(workdir.path().join("merged_2024-03-01.tcx")).unwrap();
    assert_eq!(merged.matches("<Position>").count(), 3);
}

#[test]
fn a_failing_recording_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    let fit_files = write_recordings(
        dir.path(),
        &[
            ("2024-03-01_a.fit", "first", 80),
            ("2024-03-01_bad.fit", "broken", 0),
            ("2024-03-01_c.fit", "third", 90),
        ],
    );

    let cleaned = process_date(&FlakyConverter, &fit_files, date(), workdir.path()).unwrap();
    let text = fs::read_to_string(&cleaned).unwrap();
    assert_eq!(count_laps(&text), 2);
    assert!(!text.contains("broken"));
}

#[test]
fn all_recordings_failing_fails_the_date() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    let fit_files = write_recordings(dir.path(), &[("2024-03-01_bad.fit", "broken", 0)]);

    let err = process_date(&FlakyConverter, &fit_files, date(), workdir.path()).unwrap_err();
    assert!(err.to_string().contains("2024-03-01"));
    assert!(!workdir.path().join("cleaned_2024-03-01.tcx").exists());
}

#[test]
fn single_recording_passes_through_unmerged() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    let fit_files = write_recordings(dir.path(), &[("2024-03-01_a.fit", "only", 80)]);

    let cleaned = process_date(&StubConverter, &fit_files, date(), workdir.path()).unwrap();

    // Merged output is byte-identical to the input; cleaning still strips
    // the position region.
    let merged = fs::read_to_string(workdir.path().join("merged_2024-03-01.tcx")).unwrap();
    assert_eq!(merged, single_lap_doc("only", 80));
    let text = fs::read_to_string(&cleaned).unwrap();
    assert_eq!(text.matches("<Position>").count(), 0);
    assert_eq!(count_laps(&text), 1);
}

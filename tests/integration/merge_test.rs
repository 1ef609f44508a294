//! Merge behavior over realistic documents

use rideup::tcx::{count_laps, merge_documents, merge_files, MergeError};

use crate::support::{doc_head, single_lap_doc, DOC_TAIL};

#[test]
fn merge_preserves_first_head_and_last_tail_byte_for_byte() {
    let docs = vec![
        single_lap_doc("2024-03-01T07:00:00Z", 80),
        single_lap_doc("2024-03-01T12:00:00Z", 85),
        single_lap_doc("2024-03-01T18:00:00Z", 90),
    ];
    let merged = merge_documents(&docs).unwrap();

    assert!(merged.starts_with(&doc_head("2024-03-01T07:00:00Z")));
    assert!(merged.ends_with(DOC_TAIL));
    assert_eq!(count_laps(&merged), 3);
}

#[test]
fn merge_keeps_lap_content_in_input_order() {
    let docs = vec![
        single_lap_doc("a", 80),
        single_lap_doc("b", 85),
        single_lap_doc("c", 90),
    ];
    let merged = merge_documents(&docs).unwrap();

    let first = merged.find("<Cadence>80</Cadence>").unwrap();
    let second = merged.find("<Cadence>85</Cadence>").unwrap();
    let third = merged.find("<Cadence>90</Cadence>").unwrap();
    assert!(first < second && second < third);

    // Interior document head/tail markup appears exactly once each: the
    // merged output has one XML declaration and one closing root tag.
    assert_eq!(merged.matches("<?xml").count(), 1);
    assert_eq!(merged.matches("</TrainingCenterDatabase>").count(), 1);
}

#[test]
fn merge_lap_count_is_the_sum_across_inputs() {
    for n in 2..=5 {
        let docs: Vec<String> = (0..n).map(|i| single_lap_doc(&format!("d{i}"), 80)).collect();
        let merged = merge_documents(&docs).unwrap();
        assert_eq!(count_laps(&merged), n, "N = {n}");
    }
}

#[test]
fn merge_single_document_is_byte_identical() {
    let doc = single_lap_doc("solo", 75);
    assert_eq!(merge_documents(std::slice::from_ref(&doc)).unwrap(), doc);
}

#[test]
fn merge_empty_input_is_an_error_and_writes_nothing() {
    assert!(matches!(merge_documents(&[]), Err(MergeError::NoInputs)));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged.tcx");
    assert!(matches!(merge_files(&[], &output), Err(MergeError::NoInputs)));
    assert!(!output.exists());
}

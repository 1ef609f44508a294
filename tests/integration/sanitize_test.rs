//! Sanitizing merged documents

use rideup::tcx::{count_laps, merge_documents, strip_positions};

use crate::support::single_lap_doc;

#[test]
fn merged_then_sanitized_has_no_position_regions() {
    let docs = vec![
        single_lap_doc("a", 80),
        single_lap_doc("b", 85),
        single_lap_doc("c", 90),
    ];
    let cleaned = strip_positions(&merge_documents(&docs).unwrap());

    assert_eq!(cleaned.matches("<Position>").count(), 0);
    assert_eq!(cleaned.matches("</Position>").count(), 0);
    // Lap structure survives sanitizing.
    assert_eq!(count_laps(&cleaned), 3);
    assert!(cleaned.contains("<Cadence>85</Cadence>"));
}

#[test]
fn sanitizing_twice_is_a_no_op() {
    let merged = merge_documents(&[single_lap_doc("a", 80), single_lap_doc("b", 85)]).unwrap();
    let once = strip_positions(&merged);
    assert_eq!(strip_positions(&once), once);
}

#[test]
fn sanitizing_a_position_free_document_changes_nothing() {
    let doc = "<Lap><Cadence>90</Cadence></Lap>";
    assert_eq!(strip_positions(doc), doc);
}

//! Shared fixtures: minimal TCX documents in the shape the pipeline
//! expects (one head, N lap regions, one tail).

/// A single-lap document with a position region inside the lap.
pub fn single_lap_doc(id: &str, cadence: u32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase>
  <Activities>
    <Activity Sport="Biking">
      <Id>{id}</Id>
      <Lap StartTime="{id}">
        <Track>
          <Trackpoint>
            <Position>
              <LatitudeDegrees>51.5</LatitudeDegrees>
              <LongitudeDegrees>-0.1</LongitudeDegrees>
            </Position>
            <Cadence>{cadence}</Cadence>
          </Trackpoint>
        </Track>
      </Lap>
    </Activity>
  </Activities>
</TrainingCenterDatabase>
"#
    )
}

/// The head preamble of a document built by [`single_lap_doc`].
pub fn doc_head(id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase>
  <Activities>
    <Activity Sport="Biking">
      <Id>{id}</Id>
      "#
    )
}

/// The tail postamble of a document built by [`single_lap_doc`].
pub const DOC_TAIL: &str = r#"
    </Activity>
  </Activities>
</TrainingCenterDatabase>
"#;

//! Literal-marker segment extraction.
//!
//! Lap regions are located by two literal markers: the lap-start marker is
//! `<Lap` without the closing angle bracket, because the tag carries
//! attributes (`<Lap StartTime="...">`); the lap-end marker is the full
//! `</Lap>` closing tag. The head of a document is everything before the
//! first lap-start marker, the tail everything after the last lap-end
//! marker.
//!
//! Keeping the marker convention behind this module means a structured
//! parser could replace it later without changing the merger's contract.

/// Start marker of a lap region (attribute-bearing open tag).
pub const LAP_START: &str = "<Lap";

/// End marker of a lap region.
pub const LAP_END: &str = "</Lap>";

/// A document that does not contain the expected lap markers.
///
/// A markerless document is rejected rather than passed through: silently
/// accepting one would let a malformed recording corrupt a merged session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedDocument {
    #[error("document contains no `<Lap` start marker")]
    MissingLapStart,

    #[error("document contains no `</Lap>` end marker")]
    MissingLapEnd,
}

/// Returns the suffix of `text` starting at the first lap-start marker
/// (inclusive), discarding the head preamble.
pub fn from_first_lap(text: &str) -> Result<&str, MalformedDocument> {
    match text.find(LAP_START) {
        Some(start) => Ok(&text[start..]),
        None => Err(MalformedDocument::MissingLapStart),
    }
}

/// Returns the prefix of `text` up to and including the last lap-end
/// marker, discarding the tail postamble.
pub fn through_last_lap(text: &str) -> Result<&str, MalformedDocument> {
    match text.rfind(LAP_END) {
        Some(end) => Ok(&text[..end + LAP_END.len()]),
        None => Err(MalformedDocument::MissingLapEnd),
    }
}

/// Counts the lap regions in a document by its end markers.
pub fn count_laps(text: &str) -> usize {
    text.matches(LAP_END).count()
}

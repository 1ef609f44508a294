//! TCX text transforms: segment extraction, merging, sanitizing.
//!
//! A TCX activity is treated as plain text with a recognized shape: a head
//! preamble, one or more `<Lap>` regions, and a tail postamble. The modules
//! here locate regions by literal markers instead of parsing the document,
//! a deliberate trade of generality for simplicity. Documents outside the
//! "one head + N ordered lap regions + one tail" shape are not supported.
//!
//! Two distinct matching disciplines are in play and must not be conflated:
//!
//! - [`segment`] uses first/last-occurrence semantics (suffix from the
//!   FIRST lap-start marker, prefix through the LAST lap-end marker), which
//!   is what makes multi-lap documents merge correctly.
//! - [`sanitize`] uses nearest-pair semantics (each `<Position>` start
//!   pairs with the nearest following end), which is what keeps one removal
//!   from swallowing unrelated regions.

pub mod merge;
pub mod sanitize;
pub mod segment;

pub use merge::{merge_documents, merge_files, MergeError};
pub use sanitize::{strip_positions, strip_positions_file, SanitizeError};
pub use segment::{count_laps, from_first_lap, through_last_lap, MalformedDocument};

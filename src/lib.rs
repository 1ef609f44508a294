//! rideup - merge indoor-trainer recordings and upload them to Strava.
//!
//! The library is organized around the per-date pipeline:
//!
//! - [`files`] - recording selection by name pattern and size
//! - [`convert`] - FIT-to-TCX conversion via the external tool
//! - [`tcx`] - the text transforms: segment extraction, merge, sanitize
//! - [`pipeline`] - per-date orchestration and the run loop
//! - [`strava`] - authorization and activity upload
//! - [`dates`] - command-line date validation
//! - [`config`] - TOML configuration

pub mod config;
pub mod convert;
pub mod dates;
pub mod files;
pub mod pipeline;
pub mod strava;
pub mod tcx;

pub use config::Config;

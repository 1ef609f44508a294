//! Integration tests for the rideup pipeline.

mod cli_test;
mod merge_test;
mod pipeline_test;
mod sanitize_test;
mod select_test;
mod support;

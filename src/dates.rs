//! Date-argument validation.
//!
//! A run processes one or more `YYYY-MM-DD` dates from the command line;
//! no arguments means today. Validation is all-or-nothing: the first bad
//! argument aborts before any files are touched, never a partial list.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use tracing::info;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern should be valid"));

/// A fatal command-line error: nothing has been processed when this is
/// raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("invalid date argument `{arg}`: expected YYYY-MM-DD")]
    BadFormat { arg: String },

    #[error("invalid date argument `{arg}`: not a real calendar date")]
    BadDate { arg: String },
}

/// Validates date arguments, defaulting to today when none are given.
pub fn parse_dates(args: &[String]) -> Result<Vec<NaiveDate>, UsageError> {
    if args.is_empty() {
        let today = Local::now().date_naive();
        info!("no date argument given, defaulting to today ({today})");
        return Ok(vec![today]);
    }

    let mut dates = Vec::with_capacity(args.len());
    for arg in args {
        if !DATE_SHAPE.is_match(arg) {
            return Err(UsageError::BadFormat { arg: arg.clone() });
        }
        let date = NaiveDate::parse_from_str(arg, "%Y-%m-%d")
            .map_err(|_| UsageError::BadDate { arg: arg.clone() })?;
        dates.push(date);
    }
    Ok(dates)
}

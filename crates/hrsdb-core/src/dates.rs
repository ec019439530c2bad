//! Canonical datetime representation
//!
//! Every date/time field crossing the serialization boundary is rendered and
//! parsed through this one format.

use chrono::NaiveDateTime;

use crate::errors::{HrsError, Result};

/// The single textual datetime representation used for all external
/// serialization and parsing.
pub const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Render a datetime in the canonical format
pub fn format(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Parse a datetime from the canonical format
///
/// # Errors
/// * `Validation` - If the string does not match the canonical format
pub fn parse(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).map_err(|err| HrsError::Validation {
        reason: format!("invalid datetime '{}': {}", text, err),
    })
}

// Entity Models
//
// Two related record kinds:
// - Owner: the parent record with a unique integer id and a name
// - Measurement: a value recorded against an owner, optionally grouped

pub mod owner;
pub mod measurement;

pub use owner::{Owner, OWNER_HEADER};
pub use measurement::{Measurement, Tags};

use crate::error::RecordError;
use std::str::FromStr;

/// Parse a single CSV cell, naming the column on failure
pub(crate) fn parse_field<T: FromStr>(column: &str, raw: &str) -> Result<T, RecordError> {
    raw.trim().parse::<T>().map_err(|_| RecordError::InvalidField {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

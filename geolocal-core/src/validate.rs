//! Range validation for raw provider input.

use geolocal_schema::Family;

use crate::address::{parse_endpoint, to_int};
use crate::error::{TableError, TableResult};
use crate::range::Range;

/// Validate a raw `low`/`high` pair into a [`Range`].
///
/// Both endpoints must parse, belong to the same family, and be in ascending
/// order. Errors quote the text as supplied.
pub fn validate(low_text: &str, high_text: &str) -> TableResult<Range> {
    let low_addr = parse_endpoint(low_text)?;
    let high_addr = parse_endpoint(high_text)?;

    let family = Family::of(&low_addr);
    if Family::of(&high_addr) != family {
        return Err(TableError::FamilyMismatch {
            low: low_text.to_string(),
            high: high_text.to_string(),
        });
    }

    let low = to_int(&low_addr);
    let high = to_int(&high_addr);
    if low > high {
        return Err(TableError::RangeOrder {
            low: low_text.to_string(),
            high: high_text.to_string(),
        });
    }

    Range::new(family, low, high)
}

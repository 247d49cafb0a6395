//! Inclusive address ranges.

use std::fmt;

use geolocal_schema::Family;

use crate::address::from_int;
use crate::error::{TableError, TableResult};

/// An inclusive interval of address values of one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub family: Family,
    pub low: u128,
    pub high: u128,
}

impl Range {
    /// Create a range, checking `low <= high` and the family's integer width.
    pub fn new(family: Family, low: u128, high: u128) -> TableResult<Self> {
        if high > family.max_value() {
            return Err(TableError::Corrupt(format!(
                "{} value {} out of range",
                family, high
            )));
        }
        if low > high {
            return Err(TableError::RangeOrder {
                low: from_int(family, low).to_string(),
                high: from_int(family, high).to_string(),
            });
        }
        Ok(Self { family, low, high })
    }

    /// Whether `num` lies inside the range.
    pub fn contains(&self, num: u128) -> bool {
        self.low <= num && num <= self.high
    }

    /// Whether `next` overlaps this range or starts right after it.
    /// Assumes `next.low >= self.low`.
    pub fn touches(&self, next: &Range) -> bool {
        next.low <= self.high.saturating_add(1)
    }

    /// The range as an inclusive `[low, high]` pair.
    pub fn to_pair(&self) -> [u128; 2] {
        [self.low, self.high]
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            from_int(self.family, self.low),
            from_int(self.family, self.high)
        )
    }
}

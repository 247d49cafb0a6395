//! Membership queries against built tables.

use std::net::IpAddr;

use geolocal_schema::Family;

use crate::address::{parse_endpoint, to_int};
use crate::error::{TableError, TableResult};
use crate::range::Range;
use crate::table::Table;

/// Binary search for `num` in sorted, disjoint `ranges`.
pub fn search(num: u128, ranges: &[Range]) -> bool {
    let mut lo = 0;
    let mut hi = ranges.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let r = &ranges[mid];
        if num > r.high {
            lo = mid + 1;
        } else if num < r.low {
            hi = mid;
        } else {
            return true;
        }
    }

    false
}

/// Membership of `address` in a pair of per-family range tables.
///
/// `family` defaults to the address's own family and selects the table to
/// search; a missing table means that family was not compiled in.
pub fn search_families(
    address: IpAddr,
    family: Option<Family>,
    v4: Option<&[Range]>,
    v6: Option<&[Range]>,
) -> TableResult<bool> {
    let family = family.unwrap_or_else(|| Family::of(&address));
    let ranges = match family {
        Family::V4 => v4,
        Family::V6 => v6,
    }
    .ok_or(TableError::UnsupportedFamily(family))?;

    Ok(search(to_int(&address), ranges))
}

/// Whether `address` belongs to `label` in `table`.
pub fn contains(
    table: &Table,
    label: &str,
    address: IpAddr,
    family: Option<Family>,
) -> TableResult<bool> {
    if !table.has_label(label) {
        return Err(TableError::UnknownLabel(label.to_string()));
    }

    search_families(
        address,
        family,
        table.ranges(label, Family::V4),
        table.ranges(label, Family::V6),
    )
}

/// Like [`contains`], parsing the address from text first.
pub fn contains_str(
    table: &Table,
    label: &str,
    address: &str,
    family: Option<Family>,
) -> TableResult<bool> {
    contains(table, label, parse_endpoint(address)?, family)
}

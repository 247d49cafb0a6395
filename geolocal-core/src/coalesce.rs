//! Merging of overlapping and adjacent ranges.

use crate::range::Range;

/// Merge `ranges` into the minimal sorted set of disjoint, non-adjacent ranges
/// covering the same addresses.
///
/// All ranges must share one family.
pub fn coalesce(ranges: &[Range]) -> Vec<Range> {
    let mut sorted = ranges.to_vec();
    sorted.sort_unstable_by_key(|r| r.low);

    let mut iter = sorted.into_iter();
    let Some(mut run) = iter.next() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for r in iter {
        debug_assert_eq!(r.family, run.family, "mixed families in one bucket");
        if run.touches(&r) {
            run.high = run.high.max(r.high);
        } else {
            out.push(run);
            run = r;
        }
    }
    out.push(run);

    out
}

/// Whether `ranges` is sorted by `low` with a gap of at least one address
/// between neighbours.
pub fn is_coalesced(ranges: &[Range]) -> bool {
    ranges.windows(2).all(|w| !w[0].touches(&w[1]))
}

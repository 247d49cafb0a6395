//! Bucket keys and the per-bucket accumulators filled during ingestion.

use std::collections::BTreeMap;
use std::fmt;

use geolocal_schema::Family;

use crate::config::{normalize_label, TableConfig};
use crate::range::Range;

/// Identity of a bucket: one label, one family.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub label: String,
    pub family: Family,
}

impl BucketKey {
    /// Create a key; the label is normalized to upper case.
    pub fn new(label: &str, family: Family) -> Self {
        Self {
            label: normalize_label(label),
            family,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.label, self.family)
    }
}

/// Mutable range accumulators keyed by bucket.
#[derive(Debug, Default)]
pub struct Accumulator {
    buckets: BTreeMap<BucketKey, Vec<Range>>,
    dropped: usize,
}

impl Accumulator {
    /// Create an empty accumulator with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator with an empty bucket for every configured
    /// label and enabled family.
    pub fn for_config(config: &TableConfig) -> Self {
        let mut acc = Self::new();
        for label in config.labels() {
            for family in config.enabled_families() {
                acc.buckets.entry(BucketKey::new(label, family)).or_default();
            }
        }
        acc
    }

    /// Route `range` into the bucket for `label`.
    ///
    /// Returns `None` and drops the range when its family is disabled.
    /// A label seen for the first time gets a bucket for every enabled
    /// family, the same set [`Accumulator::for_config`] creates.
    pub fn assign(&mut self, label: &str, range: Range, config: &TableConfig) -> Option<BucketKey> {
        self.ensure_label(label, config);

        if !config.is_enabled(range.family) {
            self.dropped += 1;
            return None;
        }

        let key = BucketKey::new(label, range.family);
        self.buckets.entry(key.clone()).or_default().push(range);
        Some(key)
    }

    fn ensure_label(&mut self, label: &str, config: &TableConfig) {
        for family in config.enabled_families() {
            self.buckets.entry(BucketKey::new(label, family)).or_default();
        }
    }

    /// Ranges accumulated so far for `key`.
    pub fn ranges(&self, key: &BucketKey) -> Option<&[Range]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Number of ranges dropped because their family was disabled.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Hand the accumulated buckets over for coalescing.
    pub fn into_buckets(self) -> BTreeMap<BucketKey, Vec<Range>> {
        self.buckets
    }
}

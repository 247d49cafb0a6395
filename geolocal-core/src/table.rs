//! Table construction: validate, assign, then coalesce every bucket.

use std::collections::{BTreeMap, BTreeSet};

use geolocal_schema::Family;

use crate::bucket::{Accumulator, BucketKey};
use crate::coalesce::coalesce;
use crate::config::{normalize_label, TableConfig};
use crate::error::{TableError, TableResult};
use crate::logger::{Logger, Verbosity};
use crate::range::Range;
use crate::validate::validate;

/// The built, immutable lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    module: String,
    labels: BTreeSet<String>,
    buckets: BTreeMap<BucketKey, Vec<Range>>,
}

impl Table {
    pub(crate) fn from_parts(
        module: String,
        labels: BTreeSet<String>,
        buckets: BTreeMap<BucketKey, Vec<Range>>,
    ) -> Self {
        Self {
            module,
            labels,
            buckets,
        }
    }

    /// Name of the generated lookup module.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Labels known to the table, sorted.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Whether `label` is known to the table.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(&normalize_label(label))
    }

    /// Coalesced ranges for a label and family, if that bucket was built.
    pub fn ranges(&self, label: &str, family: Family) -> Option<&[Range]> {
        self.buckets
            .get(&BucketKey::new(label, family))
            .map(Vec::as_slice)
    }

    /// All buckets in `(label, family)` order.
    pub fn buckets(&self) -> impl Iterator<Item = (&BucketKey, &[Range])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of coalesced ranges.
    pub fn range_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Input and output sizes of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketStats {
    pub key: BucketKey,
    pub input: usize,
    pub output: usize,
}

impl BucketStats {
    /// Ranges removed by coalescing.
    pub fn merged(&self) -> usize {
        self.input - self.output
    }
}

/// Counters collected while building a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Triples read.
    pub triples: usize,
    /// Ranges routed into a bucket.
    pub accepted: usize,
    /// Ranges dropped because their family is disabled.
    pub dropped: usize,
    pub buckets: Vec<BucketStats>,
}

impl BuildStats {
    /// Ranges removed by coalescing across all buckets.
    pub fn merged(&self) -> usize {
        self.buckets.iter().map(BucketStats::merged).sum()
    }
}

/// Incremental table builder.
///
/// Triples are pushed in arrival order and numbered from 1. A failed push
/// still consumes its number but adds no range; [`build`] stops at the first
/// failure.
pub struct TableBuilder<'a> {
    config: &'a TableConfig,
    logger: &'a dyn Logger,
    acc: Accumulator,
    triples: usize,
    accepted: usize,
}

impl<'a> TableBuilder<'a> {
    /// Create a builder with an empty bucket per configured label and enabled family.
    pub fn new(config: &'a TableConfig, logger: &'a dyn Logger) -> Self {
        let acc = Accumulator::for_config(config);
        logger.debug(&format!("created {} empty buckets", acc.len()));
        Self {
            config,
            logger,
            acc,
            triples: 0,
            accepted: 0,
        }
    }

    /// Validate one triple and route it into its bucket.
    ///
    /// Returns the bucket the range went to, or `None` when its family is
    /// disabled. Errors carry the 1-based position of the triple.
    pub fn push(&mut self, label: &str, low: &str, high: &str) -> TableResult<Option<BucketKey>> {
        self.triples += 1;

        let range = validate(low, high).map_err(|e| TableError::Triple {
            index: self.triples,
            label: label.to_string(),
            source: Box::new(e),
        })?;

        let key = self.acc.assign(label, range, self.config);
        if key.is_some() {
            self.accepted += 1;
        } else if self.logger.enabled(Verbosity::Debug) {
            self.logger
                .debug(&format!("dropping {} for {}: {} disabled", range, label, range.family));
        }
        Ok(key)
    }

    /// Coalesce every bucket and freeze the table.
    pub fn finish(self) -> (Table, BuildStats) {
        let dropped = self.acc.dropped();
        let mut labels: BTreeSet<String> = self.config.labels().map(str::to_string).collect();
        let mut buckets = BTreeMap::new();
        let mut stats = BuildStats {
            triples: self.triples,
            accepted: self.accepted,
            dropped,
            buckets: Vec::new(),
        };

        for (key, ranges) in self.acc.into_buckets() {
            let coalesced = coalesce(&ranges);
            let bucket = BucketStats {
                key: key.clone(),
                input: ranges.len(),
                output: coalesced.len(),
            };
            self.logger.verbose(&format!(
                "  {}: {} ranges, {} merged",
                key,
                bucket.output,
                bucket.merged()
            ));

            labels.insert(key.label.clone());
            stats.buckets.push(bucket);
            buckets.insert(key, coalesced);
        }

        if dropped > 0 {
            self.logger
                .verbose(&format!("dropped {} ranges of disabled families", dropped));
        }

        let table = Table::from_parts(self.config.module.clone(), labels, buckets);
        self.logger.info(&format!(
            "built {} buckets from {} triples ({} ranges)",
            table.bucket_count(),
            stats.triples,
            table.range_count()
        ));

        (table, stats)
    }
}

/// Build a table from `(label, low, high)` triples.
///
/// The first malformed triple aborts the build; no partial table is returned.
pub fn build<I, L, A, B>(
    triples: I,
    config: &TableConfig,
    logger: &dyn Logger,
) -> TableResult<(Table, BuildStats)>
where
    I: IntoIterator<Item = (L, A, B)>,
    L: AsRef<str>,
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut builder = TableBuilder::new(config, logger);
    for (label, low, high) in triples {
        builder.push(label.as_ref(), low.as_ref(), high.as_ref())?;
    }
    Ok(builder.finish())
}

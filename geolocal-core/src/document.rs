//! Conversion between [`Table`] and its serialized [`TableDocument`].

use std::collections::{BTreeMap, BTreeSet};

use geolocal_schema::{BucketDocument, EntryPoint, Family, TableDocument};

use crate::bucket::BucketKey;
use crate::coalesce::is_coalesced;
use crate::config::normalize_label;
use crate::error::{TableError, TableResult};
use crate::range::Range;
use crate::table::Table;

impl Table {
    /// Serialize into a document stamped with `generated_at`.
    pub fn to_document(&self, generated_at: &str) -> TableDocument {
        let entry_points = self
            .labels()
            .map(|label| {
                EntryPoint::for_label(
                    label,
                    self.ranges(label, Family::V4).is_some(),
                    self.ranges(label, Family::V6).is_some(),
                )
            })
            .collect();

        let buckets = self
            .buckets()
            .map(|(key, ranges)| BucketDocument {
                label: key.label.clone(),
                family: key.family,
                ranges: ranges.iter().map(Range::to_pair).collect(),
            })
            .collect();

        TableDocument::new(self.module(), generated_at, entry_points, buckets)
    }

    /// Rebuild a table from a document, re-checking every range.
    pub fn from_document(doc: &TableDocument) -> TableResult<Self> {
        let mut labels: BTreeSet<String> = doc
            .entry_points
            .iter()
            .map(|e| normalize_label(&e.label))
            .collect();
        let mut buckets = BTreeMap::new();

        for bucket in &doc.buckets {
            let key = BucketKey::new(&bucket.label, bucket.family);
            let ranges = bucket
                .ranges
                .iter()
                .map(|[low, high]| Range::new(bucket.family, *low, *high))
                .collect::<TableResult<Vec<_>>>()
                .map_err(|e| TableError::Corrupt(format!("bucket {}: {}", key, e)))?;

            if !is_coalesced(&ranges) {
                return Err(TableError::Corrupt(format!(
                    "bucket {}: ranges not sorted and disjoint",
                    key
                )));
            }

            labels.insert(key.label.clone());
            if buckets.insert(key.clone(), ranges).is_some() {
                return Err(TableError::Corrupt(format!("duplicate bucket {}", key)));
            }
        }

        for entry in &doc.entry_points {
            for (family, claimed) in [(Family::V4, entry.v4), (Family::V6, entry.v6)] {
                let key = BucketKey::new(&entry.label, family);
                if claimed != buckets.contains_key(&key) {
                    return Err(TableError::Corrupt(format!(
                        "entry point {} says {} is {} but the bucket is {}",
                        entry.name,
                        family,
                        if claimed { "built" } else { "absent" },
                        if claimed { "missing" } else { "present" },
                    )));
                }
            }
        }

        Ok(Table::from_parts(doc.module.clone(), labels, buckets))
    }
}

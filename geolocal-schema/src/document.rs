//! TableDocument, BucketDocument and Family types for geolocal.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Address family of a range or bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// All families, in table order.
    pub const ALL: [Family; 2] = [Family::V4, Family::V6];

    /// Family of a parsed address.
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    /// Largest integer value an address of this family can take.
    pub fn max_value(self) -> u128 {
        match self {
            Family::V4 => u32::MAX as u128,
            Family::V6 => u128::MAX,
        }
    }

    /// Short lowercase name ("v4" / "v6").
    pub fn as_str(self) -> &'static str {
        match self {
            Family::V4 => "v4",
            Family::V6 => "v6",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for family text that names neither IPv4 nor IPv6.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown address family: {0}")]
pub struct ParseFamilyError(pub String);

impl FromStr for Family {
    type Err = ParseFamilyError;

    /// Accepts `4`, `v4`, `ipv4`, `inet` and their IPv6 counterparts, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "v4" | "ipv4" | "inet" => Ok(Family::V4),
            "6" | "v6" | "ipv6" | "inet6" => Ok(Family::V6),
            _ => Err(ParseFamilyError(s.to_string())),
        }
    }
}

/// Generated lookup entry point for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub label: String,
    /// Name a code emitter gives the membership function, e.g. `in_us`.
    pub name: String,
    /// Whether the IPv4 table was compiled in for this label.
    pub v4: bool,
    /// Whether the IPv6 table was compiled in for this label.
    pub v6: bool,
}

impl EntryPoint {
    /// Create the entry point for `label`, deriving its function name.
    pub fn for_label(label: &str, v4: bool, v6: bool) -> Self {
        Self {
            label: label.to_string(),
            name: format!("in_{}", label.to_lowercase()),
            v4,
            v6,
        }
    }
}

/// Coalesced ranges of one (label, family) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDocument {
    pub label: String,
    pub family: Family,
    /// Inclusive `[low, high]` pairs, ascending and disjoint.
    pub ranges: Vec<[u128; 2]>,
}

/// A serialized lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    pub version: u32,
    pub module: String,
    pub generated_at: String,
    pub entry_points: Vec<EntryPoint>,
    pub buckets: Vec<BucketDocument>,
}

impl TableDocument {
    /// Create a new document with the current schema version.
    pub fn new(
        module: impl Into<String>,
        generated_at: impl Into<String>,
        mut entry_points: Vec<EntryPoint>,
        mut buckets: Vec<BucketDocument>,
    ) -> Self {
        // Deterministic ordering: entry points by label, buckets by (label, family)
        entry_points.sort_by(|a, b| a.label.cmp(&b.label));
        buckets.sort_by(|a, b| {
            a.label
                .cmp(&b.label)
                .then_with(|| a.family.cmp(&b.family))
        });

        Self {
            version: SCHEMA_VERSION,
            module: module.into(),
            generated_at: generated_at.into(),
            entry_points,
            buckets,
        }
    }

    /// Look up the bucket for a label and family.
    pub fn bucket(&self, label: &str, family: Family) -> Option<&BucketDocument> {
        self.buckets
            .iter()
            .find(|b| b.label == label && b.family == family)
    }

    /// Total number of ranges across all buckets.
    pub fn range_count(&self) -> usize {
        self.buckets.iter().map(|b| b.ranges.len()).sum()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        // Only strings, integers and vectors; serialization cannot fail.
        serde_json::to_string_pretty(self).expect("TableDocument serialization cannot fail")
    }

    /// Deserialize from JSON, rejecting other schema versions.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: TableDocument = serde_json::from_str(json)?;
        if doc.version != SCHEMA_VERSION {
            return Err(DocumentError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found: doc.version,
            });
        }
        Ok(doc)
    }
}

/// Errors that can occur when reading table documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> TableDocument {
        TableDocument::new(
            "Geolocal",
            "2026-01-01T00:00:00Z",
            vec![
                EntryPoint::for_label("US", true, true),
                EntryPoint::for_label("AU", true, false),
            ],
            vec![
                BucketDocument {
                    label: "US".to_string(),
                    family: Family::V6,
                    ranges: vec![[1, 1], [u128::MAX - 1, u128::MAX]],
                },
                BucketDocument {
                    label: "US".to_string(),
                    family: Family::V4,
                    ranges: vec![[0x01000000, 0x0100000A]],
                },
                BucketDocument {
                    label: "AU".to_string(),
                    family: Family::V4,
                    ranges: vec![],
                },
            ],
        )
    }

    // ===========================================
    // Family
    // ===========================================

    #[test]
    fn test_family_from_str_variants() {
        assert_eq!("4".parse::<Family>().unwrap(), Family::V4);
        assert_eq!("v4".parse::<Family>().unwrap(), Family::V4);
        assert_eq!("IPv4".parse::<Family>().unwrap(), Family::V4);
        assert_eq!("6".parse::<Family>().unwrap(), Family::V6);
        assert_eq!("inet6".parse::<Family>().unwrap(), Family::V6);
    }

    #[test]
    fn test_family_from_str_unknown() {
        let err = "ipx".parse::<Family>().unwrap_err();
        assert_eq!(err, ParseFamilyError("ipx".to_string()));
        assert!(err.to_string().contains("unknown address family"));
    }

    #[test]
    fn test_family_of_address() {
        assert_eq!(Family::of(&"10.0.0.1".parse().unwrap()), Family::V4);
        assert_eq!(Family::of(&"::1".parse().unwrap()), Family::V6);
    }

    #[test]
    fn test_family_max_value() {
        assert_eq!(Family::V4.max_value(), 0xFFFF_FFFF);
        assert_eq!(Family::V6.max_value(), u128::MAX);
    }

    #[test]
    fn test_family_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Family::V4).unwrap(), "\"v4\"");
        assert_eq!(serde_json::to_string(&Family::V6).unwrap(), "\"v6\"");
    }

    // ===========================================
    // EntryPoint
    // ===========================================

    #[test]
    fn test_entry_point_name_is_lowercase() {
        let ep = EntryPoint::for_label("EU", true, false);
        assert_eq!(ep.name, "in_eu");
        assert_eq!(ep.label, "EU");
        assert!(ep.v4);
        assert!(!ep.v6);
    }

    // ===========================================
    // TableDocument
    // ===========================================

    #[test]
    fn test_new_sorts_entry_points_and_buckets() {
        let doc = sample_document();
        let labels: Vec<_> = doc.entry_points.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["AU", "US"]);

        let keys: Vec<_> = doc
            .buckets
            .iter()
            .map(|b| (b.label.as_str(), b.family))
            .collect();
        assert_eq!(
            keys,
            vec![("AU", Family::V4), ("US", Family::V4), ("US", Family::V6)]
        );
    }

    #[test]
    fn test_roundtrip_preserves_full_width_v6_values() {
        let doc = sample_document();
        let restored = TableDocument::from_json(&doc.to_json()).expect("deserialize");
        assert_eq!(doc, restored);
        assert_eq!(
            restored.bucket("US", Family::V6).unwrap().ranges[1],
            [u128::MAX - 1, u128::MAX]
        );
    }

    #[test]
    fn test_to_json_is_deterministic() {
        assert_eq!(sample_document().to_json(), sample_document().to_json());
    }

    #[test]
    fn test_bucket_lookup_and_range_count() {
        let doc = sample_document();
        assert!(doc.bucket("AU", Family::V6).is_none());
        assert_eq!(doc.bucket("US", Family::V4).unwrap().ranges.len(), 1);
        assert_eq!(doc.range_count(), 3);
    }

    #[test]
    fn test_from_json_version_mismatch() {
        let mut doc = sample_document();
        doc.version = 99;
        let json = serde_json::to_string(&doc).unwrap();

        let result = TableDocument::from_json(&json);
        assert!(matches!(
            result,
            Err(DocumentError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found: 99
            })
        ));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = TableDocument::from_json("{not json");
        assert!(matches!(result, Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_json_shape() {
        let json = sample_document().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["module"], "Geolocal");
        assert_eq!(value["entry_points"][1]["name"], "in_us");
        assert_eq!(value["buckets"][1]["family"], "v4");
        assert_eq!(value["buckets"][1]["ranges"][0][0], 0x01000000);
    }
}

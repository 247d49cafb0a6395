//! Provider range file loader.
//!
//! Parses range files into `(label, low, high)` rows for the table builder.
//! Format:
//! - One entry per line, fields separated by commas
//! - Lines starting with # are comments
//! - Empty lines are ignored
//! - Fields may be wrapped in double quotes
//! - Explicit ranges: 1.0.0.0,1.0.0.255,AU
//! - CIDR blocks: 2001:db8::/32,DE
//!
//! A row is emitted once per configured label that collects its country
//! code; rows for unconfigured codes are skipped. Endpoint validation is left
//! to the table builder.

use std::path::Path;

use geolocal_core::TableConfig;
use geolocal_fs::{Filesystem, FsError};
use ipnet::IpNet;
use thiserror::Error;

/// Errors from range file loading.
#[derive(Debug, Error)]
pub enum RangeLoadError {
    #[error("failed to read range file: {0}")]
    Read(#[from] FsError),

    #[error("malformed entry on line {line}: {content}")]
    Malformed { line: usize, content: String },

    #[error("invalid CIDR block on line {line}: {content}")]
    Cidr { line: usize, content: String },
}

/// One range destined for one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRow {
    /// 1-based line in the source file.
    pub line: usize,
    pub label: String,
    pub low: String,
    pub high: String,
}

/// Rows read from one range file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedRanges {
    pub rows: Vec<RangeRow>,
    /// Entries read (comments and blank lines excluded).
    pub entries: usize,
    /// Entries whose country code no label collects.
    pub skipped: usize,
}

/// Load ranges from a file.
pub fn load_ranges<F: Filesystem>(
    fs: &F,
    path: &Path,
    config: &TableConfig,
) -> Result<LoadedRanges, RangeLoadError> {
    let content = fs.read_file(path)?;
    parse_ranges(&content, config)
}

/// Parse range file content from a string.
pub fn parse_ranges(content: &str, config: &TableConfig) -> Result<LoadedRanges, RangeLoadError> {
    let mut loaded = LoadedRanges::default();

    for (line_num, line) in content.lines().enumerate() {
        let line_no = line_num + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        loaded.entries += 1;

        let fields: Vec<&str> = trimmed.split(',').map(unquote).collect();
        let (low, high, code) = match fields.as_slice() {
            [low, high, code] => (low.to_string(), high.to_string(), *code),
            [cidr, code] => {
                let net: IpNet = cidr.parse().map_err(|_| RangeLoadError::Cidr {
                    line: line_no,
                    content: trimmed.to_string(),
                })?;
                (net.network().to_string(), net.broadcast().to_string(), *code)
            }
            _ => {
                return Err(RangeLoadError::Malformed {
                    line: line_no,
                    content: trimmed.to_string(),
                })
            }
        };

        if code.is_empty() {
            return Err(RangeLoadError::Malformed {
                line: line_no,
                content: trimmed.to_string(),
            });
        }

        let labels = config.labels_for(code);
        if labels.is_empty() {
            loaded.skipped += 1;
            continue;
        }

        for label in labels {
            loaded.rows.push(RangeRow {
                line: line_no,
                label: label.to_string(),
                low: low.clone(),
                high: high.clone(),
            });
        }
    }

    Ok(loaded)
}

/// Trim a field and strip one pair of surrounding double quotes.
fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geolocal_fs::MockFilesystem;
    use std::path::PathBuf;

    fn config() -> TableConfig {
        TableConfig::new()
            .with_label("US", ["US"])
            .with_label("NA", ["US", "CA"])
    }

    // ===========================================
    // Parsing
    // ===========================================

    #[test]
    fn test_parse_empty() {
        let loaded = parse_ranges("", &config()).expect("parse");
        assert!(loaded.rows.is_empty());
        assert_eq!(loaded.entries, 0);
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let content = "# header\n\n   # indented comment\n";
        let loaded = parse_ranges(content, &config()).expect("parse");
        assert_eq!(loaded.entries, 0);
    }

    #[test]
    fn test_parse_explicit_range() {
        let loaded = parse_ranges("1.0.0.0,1.0.0.255,CA\n", &config()).expect("parse");
        assert_eq!(
            loaded.rows,
            vec![RangeRow {
                line: 1,
                label: "NA".to_string(),
                low: "1.0.0.0".to_string(),
                high: "1.0.0.255".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_quoted_fields() {
        let loaded = parse_ranges("\"1.0.0.0\", \"1.0.0.255\" ,\"ca\"\n", &config()).expect("parse");
        assert_eq!(loaded.rows.len(), 1);
        assert_eq!(loaded.rows[0].low, "1.0.0.0");
        assert_eq!(loaded.rows[0].high, "1.0.0.255");
    }

    #[test]
    fn test_parse_cidr_v4() {
        let loaded = parse_ranges("10.1.0.0/16,CA\n", &config()).expect("parse");
        assert_eq!(loaded.rows[0].low, "10.1.0.0");
        assert_eq!(loaded.rows[0].high, "10.1.255.255");
    }

    #[test]
    fn test_parse_cidr_v6() {
        let loaded = parse_ranges("2001:db8::/32,CA\n", &config()).expect("parse");
        assert_eq!(loaded.rows[0].low, "2001:db8::");
        assert_eq!(loaded.rows[0].high, "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_parse_code_fans_out_to_every_label() {
        let loaded = parse_ranges("1.0.0.0,1.0.0.1,us\n", &config()).expect("parse");
        let labels: Vec<_> = loaded.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["NA", "US"]);
    }

    #[test]
    fn test_parse_skips_unconfigured_codes() {
        let content = "1.0.0.0,1.0.0.1,JP\n2.0.0.0,2.0.0.1,US\n";
        let loaded = parse_ranges(content, &config()).expect("parse");
        assert_eq!(loaded.entries, 2);
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[0].line, 2);
    }

    #[test]
    fn test_parse_leaves_endpoint_validation_to_builder() {
        // Reversed endpoints still load; the builder rejects them
        let loaded = parse_ranges("1.0.0.9,1.0.0.1,CA\n", &config()).expect("parse");
        assert_eq!(loaded.rows.len(), 1);
    }

    #[test]
    fn test_parse_malformed_field_count() {
        let content = "1.0.0.0,1.0.0.1,CA\n1.0.0.0\n";
        let result = parse_ranges(content, &config());
        assert!(matches!(
            result,
            Err(RangeLoadError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_missing_code() {
        let result = parse_ranges("1.0.0.0,1.0.0.1,\n", &config());
        assert!(matches!(result, Err(RangeLoadError::Malformed { line: 1, .. })));
    }

    #[test]
    fn test_parse_invalid_cidr() {
        let result = parse_ranges("# c\n10.0.0.0/33,CA\n", &config());
        assert!(matches!(result, Err(RangeLoadError::Cidr { line: 2, .. })));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(" \"US\" "), "US");
        assert_eq!(unquote("US"), "US");
        assert_eq!(unquote("\"US"), "\"US");
    }

    // ===========================================
    // File loading
    // ===========================================

    #[test]
    fn test_load_from_file() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/data/ranges.csv");
        fs.add_file(path.clone(), "1.0.0.0,1.0.0.255,US\n");

        let loaded = load_ranges(&fs, &path, &config()).expect("load");
        assert_eq!(loaded.rows.len(), 2);
    }

    #[test]
    fn test_load_file_not_found() {
        let fs = MockFilesystem::new();
        let result = load_ranges(&fs, Path::new("/missing.csv"), &config());
        assert!(matches!(result, Err(RangeLoadError::Read(_))));
    }

    #[test]
    fn test_load_error_display() {
        let err = RangeLoadError::Malformed {
            line: 5,
            content: "x".to_string(),
        };
        assert!(err.to_string().contains("line 5"));
    }
}

//! Error taxonomy for table construction and lookup.

use geolocal_schema::Family;
use thiserror::Error;

/// Errors from validating ranges, building tables and querying them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("invalid address: {0}")]
    Parse(String),

    #[error("{low} and {high} must be in the same address family")]
    FamilyMismatch { low: String, high: String },

    #[error("range supplied in the wrong order: {low}..{high}")]
    RangeOrder { low: String, high: String },

    #[error("unknown address family: {0}")]
    UnknownFamily(String),

    #[error("ip{0} was not compiled in")]
    UnsupportedFamily(Family),

    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("triple {index} ({label}): {source}")]
    Triple {
        index: usize,
        label: String,
        #[source]
        source: Box<TableError>,
    },

    #[error("corrupt table: {0}")]
    Corrupt(String),
}

impl TableError {
    /// The underlying error, looking through positional wrappers.
    pub fn root(&self) -> &TableError {
        match self {
            TableError::Triple { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result alias for table operations.
pub type TableResult<T> = Result<T, TableError>;

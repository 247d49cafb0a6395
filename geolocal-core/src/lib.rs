//! geolocal Core
//!
//! Turns raw per-country address ranges into a lookup table:
//! - `validate` - parse and check a raw `low`/`high` pair
//! - `bucket` - route ranges into `(label, family)` buckets
//! - `coalesce` - merge overlapping and adjacent ranges
//! - `table` - the build pipeline and the immutable `Table`
//! - `lookup` - binary-search membership queries
//!
//! Status output goes through the `Logger` passed to the builder.

pub mod address;
pub mod bucket;
pub mod coalesce;
pub mod config;
pub mod document;
pub mod error;
pub mod logger;
pub mod lookup;
pub mod range;
pub mod table;
pub mod validate;

pub use bucket::{Accumulator, BucketKey};
pub use coalesce::coalesce;
pub use config::TableConfig;
pub use error::{TableError, TableResult};
pub use geolocal_schema::Family;
pub use logger::{Logger, MockLogger, NullLogger, StatusLogger, StderrLogger, Verbosity};
pub use lookup::{contains, contains_str, search, search_families};
pub use range::Range;
pub use table::{build, BuildStats, BucketStats, Table, TableBuilder};
pub use validate::validate;

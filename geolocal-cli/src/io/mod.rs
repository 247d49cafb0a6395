//! IO helpers for CLI operations.
//!
//! Provides utilities for:
//! - Loading the JSON configuration
//! - Loading provider range files
//! - Writing and reading table documents

pub mod config_loader;
pub mod range_loader;
pub mod table_writer;

pub use config_loader::{load_config, ConfigLoadError, LoadedConfig};
pub use range_loader::{load_ranges, LoadedRanges, RangeLoadError, RangeRow};
pub use table_writer::{read_table, TableFileError, TableWriter};

//! Command orchestration for CLI subcommands.
//!
//! Provides execute functions for:
//! - `build` - Build a table from range files
//! - `lookup` - Query a built table

pub mod build;
pub mod lookup;

pub use build::{execute_build, BuildResult};
pub use lookup::{execute_lookup, LookupAnswer};

use crate::cli::CliError;
use crate::io::{ConfigLoadError, RangeLoadError, TableFileError};
use geolocal_core::TableError;
use thiserror::Error;

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("config error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("{path}: {source}")]
    Ranges {
        path: String,
        #[source]
        source: RangeLoadError,
    },

    #[error("{path}:{line}: {source}")]
    InvalidRange {
        path: String,
        line: usize,
        #[source]
        source: TableError,
    },

    #[error("table file error: {0}")]
    TableFile(#[from] TableFileError),

    #[error("lookup error: {0}")]
    Lookup(#[from] TableError),
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;

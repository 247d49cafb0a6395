//! Exit codes for the geolocal CLI.

use crate::commands::CommandError;
use crate::io::{ConfigLoadError, RangeLoadError};

/// Exit code constants.
pub mod codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Invalid arguments.
    pub const INVALID_ARGS: i32 = 1;
    /// IO error.
    pub const IO_ERROR: i32 = 2;
    /// Config file could not be parsed or is unusable.
    pub const CONFIG_ERROR: i32 = 3;
    /// Range file is malformed.
    pub const RANGE_FILE_ERROR: i32 = 4;
    /// A range was rejected while building the table.
    pub const BUILD_ERROR: i32 = 5;
    /// A lookup could not be answered.
    pub const LOOKUP_ERROR: i32 = 6;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> i32 {
    match error {
        CommandError::InvalidArgument(_) => codes::INVALID_ARGS,
        CommandError::Config(ConfigLoadError::Read(_)) => codes::IO_ERROR,
        CommandError::Config(_) => codes::CONFIG_ERROR,
        CommandError::Ranges {
            source: RangeLoadError::Read(_),
            ..
        } => codes::IO_ERROR,
        CommandError::Ranges { .. } => codes::RANGE_FILE_ERROR,
        CommandError::InvalidRange { .. } => codes::BUILD_ERROR,
        CommandError::TableFile(_) => codes::IO_ERROR,
        CommandError::Lookup(_) => codes::LOOKUP_ERROR,
    }
}

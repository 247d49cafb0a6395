//! Geolocal CLI.
//!
//! This crate provides the command-line interface for building per-country
//! IP range tables from provider range files and querying them.

pub mod cli;
pub mod commands;
pub mod exit;
pub mod io;

pub use cli::{parse_from, status_logger, BuildArgs, Cli, CliError, Command, LookupArgs};
pub use commands::{
    execute_build, execute_lookup, BuildResult, CommandError, CommandResult, LookupAnswer,
};

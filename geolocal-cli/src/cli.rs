//! CLI argument parsing for geolocal.
//!
//! Provides the `build` and `lookup` subcommands of the unified binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geolocal_core::{Logger, NullLogger, StderrLogger, Verbosity};
use thiserror::Error;

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("at least one --input range file is required")]
    NoInputs,

    #[error("--no-ipv4 and --no-ipv6 together leave nothing to build")]
    NoFamilies,

    #[error("--module must not be empty")]
    EmptyModule,

    #[error("--label must not be empty")]
    EmptyLabel,

    #[error("at least one address is required")]
    NoAddresses,
}

/// Build and query per-country IP range lookup tables.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "geolocal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Build a lookup table from provider range files.
    Build(BuildArgs),
    /// Check addresses against a built table.
    Lookup(LookupArgs),
}

/// Arguments for the build command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
    /// Configuration file (JSON) naming countries and families.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Provider range file; may be given several times.
    #[arg(short, long = "input")]
    pub inputs: Vec<PathBuf>,

    /// Output path for the table, overriding the config's `file`.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Module name recorded in the table, overriding the config's `module`.
    #[arg(long)]
    pub module: Option<String>,

    /// Leave IPv4 ranges out of the table.
    #[arg(long)]
    pub no_ipv4: bool,

    /// Leave IPv6 ranges out of the table.
    #[arg(long)]
    pub no_ipv6: bool,

    /// Increase status output (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress status output.
    #[arg(short, long)]
    pub quiet: bool,
}

impl BuildArgs {
    /// Validate the arguments.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.inputs.is_empty() {
            return Err(CliError::NoInputs);
        }
        if self.no_ipv4 && self.no_ipv6 {
            return Err(CliError::NoFamilies);
        }
        if matches!(&self.module, Some(m) if m.trim().is_empty()) {
            return Err(CliError::EmptyModule);
        }
        Ok(())
    }
}

/// Arguments for the lookup command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct LookupArgs {
    /// Table file written by `build`.
    #[arg(short, long)]
    pub table: PathBuf,

    /// Label (country) to test membership in.
    #[arg(short, long)]
    pub label: String,

    /// Address family to search (4, 6, v4, v6); inferred from each address if omitted.
    #[arg(short, long)]
    pub family: Option<String>,

    /// Addresses to check.
    pub addresses: Vec<String>,
}

impl LookupArgs {
    /// Validate the arguments.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.label.trim().is_empty() {
            return Err(CliError::EmptyLabel);
        }
        if self.addresses.is_empty() {
            return Err(CliError::NoAddresses);
        }
        Ok(())
    }
}

/// Parse CLI arguments from an iterator (for testing).
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

/// Status logger for the given flags; quiet wins over verbose.
pub fn status_logger(verbose: u8, quiet: bool) -> Box<dyn Logger> {
    if quiet {
        Box::new(NullLogger)
    } else {
        Box::new(StderrLogger::stderr(Verbosity::from_count(verbose)))
    }
}

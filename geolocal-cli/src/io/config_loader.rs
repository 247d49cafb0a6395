//! Configuration file loader.
//!
//! The config is a JSON object:
//!
//! ```json
//! {
//!   "module": "Geolocal",
//!   "file": "geolocal.json",
//!   "ipv4": true,
//!   "ipv6": false,
//!   "quiet": false,
//!   "countries": { "us": "US", "eu": ["DE", "FR", "NL"] }
//! }
//! ```
//!
//! Each country entry maps a label to one provider code or a list of codes.
//! Unknown keys are ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use geolocal_core::config::DEFAULT_MODULE;
use geolocal_core::TableConfig;
use geolocal_fs::{Filesystem, FsError};
use serde::Deserialize;
use thiserror::Error;

/// Default output path for the built table.
pub const DEFAULT_OUTPUT_FILE: &str = "geolocal.json";

/// Errors from config loading.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    Read(#[from] FsError),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config names no countries")]
    NoCountries,

    #[error("config enables neither ipv4 nor ipv6")]
    NoFamilies,
}

/// One provider code or several.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Codes {
    One(String),
    Many(Vec<String>),
}

impl Codes {
    fn into_vec(self) -> Vec<String> {
        match self {
            Codes::One(code) => vec![code],
            Codes::Many(codes) => codes,
        }
    }
}

fn default_module() -> String {
    DEFAULT_MODULE.to_string()
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_true() -> bool {
    true
}

/// Raw config file contents.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_module")]
    pub module: String,
    #[serde(default = "default_file")]
    pub file: PathBuf,
    #[serde(default = "default_true")]
    pub ipv4: bool,
    #[serde(default = "default_true")]
    pub ipv6: bool,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub countries: BTreeMap<String, Codes>,
}

/// A loaded configuration: the table config plus where to write the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub table: TableConfig,
    pub output: PathBuf,
    pub quiet: bool,
}

/// Load a config from a file.
pub fn load_config<F: Filesystem>(fs: &F, path: &Path) -> Result<LoadedConfig, ConfigLoadError> {
    let content = fs.read_file(path)?;
    parse_config(&content)
}

/// Parse config content from a string.
pub fn parse_config(content: &str) -> Result<LoadedConfig, ConfigLoadError> {
    let file: ConfigFile = serde_json::from_str(content)?;

    if file.countries.is_empty() {
        return Err(ConfigLoadError::NoCountries);
    }
    if !file.ipv4 && !file.ipv6 {
        return Err(ConfigLoadError::NoFamilies);
    }

    let mut table = TableConfig::new()
        .with_ipv4(file.ipv4)
        .with_ipv6(file.ipv6)
        .with_module(file.module);
    for (label, codes) in file.countries {
        table.add_label(&label, codes.into_vec());
    }

    Ok(LoadedConfig {
        table,
        output: file.file,
        quiet: file.quiet,
    })
}

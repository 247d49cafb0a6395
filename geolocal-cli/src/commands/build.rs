//! Build command orchestration.
//!
//! Loads the config and every range file, runs the table builder, and writes
//! the table document.

use std::path::PathBuf;

use geolocal_clock::Clock;
use geolocal_core::{BuildStats, Logger, NullLogger, TableBuilder, TableConfig};
use geolocal_fs::Filesystem;

use crate::cli::BuildArgs;
use crate::io::{load_config, load_ranges, ConfigLoadError, LoadedConfig, TableWriter};

use super::{CommandError, CommandResult};

/// Result of build command execution.
#[derive(Debug)]
pub struct BuildResult {
    /// Path the table was written to.
    pub output: PathBuf,
    /// Builder counters.
    pub stats: BuildStats,
    /// Number of buckets in the table.
    pub buckets: usize,
    /// Number of coalesced ranges in the table.
    pub ranges: usize,
    /// Provider entries whose code no label collects.
    pub skipped: usize,
}

/// Execute the build command.
pub fn execute_build<F, C>(
    args: &BuildArgs,
    fs: &F,
    clock: &C,
    logger: &dyn Logger,
) -> CommandResult<BuildResult>
where
    F: Filesystem,
    C: Clock,
{
    args.validate()?;

    let loaded = load_config(fs, &args.config)?;
    let logger: &dyn Logger = if loaded.quiet { &NullLogger } else { logger };
    let (config, output) = apply_overrides(args, loaded)?;

    let mut builder = TableBuilder::new(&config, logger);
    let mut skipped = 0;

    for path in &args.inputs {
        let ranges = load_ranges(fs, path, &config).map_err(|e| CommandError::Ranges {
            path: path.display().to_string(),
            source: e,
        })?;
        logger.verbose(&format!(
            "read {} entries from {} ({} rows, {} skipped)",
            ranges.entries,
            path.display(),
            ranges.rows.len(),
            ranges.skipped
        ));
        skipped += ranges.skipped;

        for row in &ranges.rows {
            builder
                .push(&row.label, &row.low, &row.high)
                .map_err(|e| CommandError::InvalidRange {
                    path: path.display().to_string(),
                    line: row.line,
                    source: e.root().clone(),
                })?;
        }
    }

    let (table, stats) = builder.finish();

    let doc = table.to_document(&clock.now_utc());
    TableWriter::new(fs).write(&output, &doc)?;
    logger.info(&format!("done, result in {}", output.display()));

    Ok(BuildResult {
        output,
        stats,
        buckets: table.bucket_count(),
        ranges: table.range_count(),
        skipped,
    })
}

/// Apply command-line overrides to the loaded config.
///
/// The flags can switch off the one family the config left enabled, so the
/// family check is repeated on the result.
fn apply_overrides(
    args: &BuildArgs,
    loaded: LoadedConfig,
) -> Result<(TableConfig, PathBuf), ConfigLoadError> {
    let mut config = loaded.table;
    if args.no_ipv4 {
        config.ipv4 = false;
    }
    if args.no_ipv6 {
        config.ipv6 = false;
    }
    if let Some(module) = &args.module {
        config.module = module.clone();
    }

    if config.enabled_families().next().is_none() {
        return Err(ConfigLoadError::NoFamilies);
    }

    let output = args.out.clone().unwrap_or(loaded.output);
    Ok((config, output))
}

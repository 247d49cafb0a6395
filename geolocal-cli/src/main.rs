//! Geolocal CLI binary.
//!
//! Entry point for the `geolocal` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use geolocal_cli::exit::{codes, exit_code};
use geolocal_cli::{
    execute_build, execute_lookup, status_logger, BuildArgs, Cli, Command, CommandError,
    LookupArgs,
};
use geolocal_clock::SystemClock;
use geolocal_fs::RealFilesystem;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build(args) => run_build(args),
        Command::Lookup(args) => run_lookup(args),
    };

    match result {
        Ok(()) => ExitCode::from(codes::SUCCESS as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

/// Run the build command.
fn run_build(args: BuildArgs) -> Result<(), CommandError> {
    let logger = status_logger(args.verbose, args.quiet);
    let result = execute_build(&args, &RealFilesystem, &SystemClock, logger.as_ref())?;

    if !args.quiet {
        println!(
            "Wrote {} ranges in {} buckets to {} ({} merged, {} dropped, {} skipped)",
            result.ranges,
            result.buckets,
            result.output.display(),
            result.stats.merged(),
            result.stats.dropped,
            result.skipped
        );
    }

    Ok(())
}

/// Run the lookup command.
fn run_lookup(args: LookupArgs) -> Result<(), CommandError> {
    for answer in execute_lookup(&args, &RealFilesystem)? {
        println!("{} {}", answer.address, answer.member);
    }
    Ok(())
}

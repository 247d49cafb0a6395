//! Lookup command: membership checks against a built table.

use geolocal_core::address::parse_family;
use geolocal_core::contains_str;
use geolocal_fs::Filesystem;

use crate::cli::LookupArgs;
use crate::io::read_table;

use super::CommandResult;

/// Membership answer for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupAnswer {
    pub address: String,
    pub member: bool,
}

/// Execute the lookup command.
///
/// Answers are returned in argument order. The first address that cannot be
/// parsed or searched aborts the command.
pub fn execute_lookup<F: Filesystem>(
    args: &LookupArgs,
    fs: &F,
) -> CommandResult<Vec<LookupAnswer>> {
    args.validate()?;

    let family = args.family.as_deref().map(parse_family).transpose()?;
    let table = read_table(fs, &args.table)?;

    args.addresses
        .iter()
        .map(|address| {
            let member = contains_str(&table, &args.label, address, family)?;
            Ok(LookupAnswer {
                address: address.clone(),
                member,
            })
        })
        .collect()
}

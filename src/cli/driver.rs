//! The generation pipeline: load, discover, render, write.

use crate::aggregate::aggregate;
use crate::cli::args::CliArgs;
use crate::emitter::generate;
use crate::error::GenumError;
use crate::loader::load_package;
use crate::model::GenerationUnit;
use std::path::PathBuf;
use tracing::{Level, span};

/// Load the package and build its generation units without writing anything.
pub fn discover(args: &CliArgs) -> Result<Vec<GenerationUnit>, GenumError> {
    let _span = span!(Level::DEBUG, "discover", file = %args.file).entered();
    let package = load_package(&args.loader_config())?;
    aggregate(&package)
}

/// Generate every output file. Returns the written paths.
///
/// Stops at the first failure; files written before it are left in place.
pub fn run(args: &CliArgs) -> Result<Vec<PathBuf>, GenumError> {
    let units = discover(args)?;
    let mut written = Vec::with_capacity(units.len());
    for unit in &units {
        written.push(generate(unit, &args.dir)?);
    }
    Ok(written)
}

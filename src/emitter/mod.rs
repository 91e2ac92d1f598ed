//! Go code generation for generation units.

pub mod printer;
pub mod renderer;
pub mod writer;

pub use printer::GoPrinter;
pub use renderer::render_unit;
pub use writer::write_output;

use crate::error::GenumError;
use crate::model::GenerationUnit;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render `unit` and write it below the package directory `dir`.
pub fn generate(unit: &GenerationUnit, dir: &Path) -> Result<PathBuf, GenumError> {
    let code = render_unit(unit).map_err(|source| GenumError::Generate {
        output: unit.output.clone(),
        source,
    })?;
    let path = write_output(dir, &unit.output, &code).map_err(|source| GenumError::Write {
        output: unit.output.clone(),
        source,
    })?;
    info!(output = %path.display(), enums = unit.enums.len(), "generated");
    Ok(path)
}

//! genum: code generator for Go enum-like constant groups.
//!
//! Reads `//go:generate genum -type=T` directives from a Go file, resolves
//! the constants of each type across the package and writes `String`,
//! `IsValid`, `TValues` and (for string enums) `ParseT` helpers.
//!
//! Pipeline: [`loader`] → [`aggregate`] (directives + [`extractor`]) →
//! [`emitter`].

pub mod aggregate;
pub mod build_tags;
pub mod cli;
pub mod directive;
pub mod emitter;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod model;
pub mod tracing_config;

pub use build_tags::BuildContext;
pub use directive::{Directive, is_genum_directive, parse_from_comment};
pub use error::{DirectiveError, ExtractError, GenumError, RenderError};
pub use loader::{LoadMode, LoaderConfig, Package, load_package};
pub use model::{BaseType, CaseHandling, Enum, EnumValue, GenerationUnit};

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod model_tests;

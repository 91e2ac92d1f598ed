//! Package checker for the genum generator.
//!
//! Builds the package scope across every file, resolves declared types to
//! interned `TypeId`s and evaluates constant declarations (`iota`, implicit
//! repetition, arithmetic, conversions, references across files).
//!
//! Function bodies, variable initialisers, generic instantiation and
//! imported packages are outside the model. Imported names resolve to
//! opaque types and unknown values.

pub mod constant;
pub mod info;
pub mod intern;
pub mod scope;
pub mod state;
pub mod types;

pub use constant::{ConstValue, quote_go_string, unquote_string};
pub use info::{CheckDiagnostic, ConstInfo, TypeClass, TypeInfo};
pub use intern::TypeInterner;
pub use scope::{Object, ObjectId, ObjectKind};
pub use state::CheckerState;
pub use types::{BasicKind, TypeId, TypeKey};

use genum_parser::SourceFile;

/// Check the files of one package.
pub fn check_package(files: &[SourceFile]) -> TypeInfo {
    CheckerState::new(files).check()
}

#[cfg(test)]
#[path = "tests/constant_tests.rs"]
mod constant_tests;

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod intern_tests;

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;

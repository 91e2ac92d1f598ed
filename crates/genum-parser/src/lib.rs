//! Go declaration parser for the genum generator.
//!
//! Produces a tagged-variant declaration model of one Go source file:
//!
//! - `Decl::Gen` - `import`, `const`, `type` and `var` declarations
//!   (`DeclKind` tags which one), each holding its specs
//! - `Decl::Func` - function and method declarations (bodies are skipped)
//!
//! Constant initialisers and type expressions are parsed in full because the
//! checker evaluates them. Everything else is skipped with balanced-token
//! recovery, so arbitrary function bodies never produce diagnostics.

pub mod ast;
pub mod state;
pub mod visit;

pub use ast::*;
pub use state::{ParseDiagnostic, ParserState};
pub use visit::{Visitor, walk_file, walk_gen_decl};

#[cfg(test)]
#[path = "tests/ast_tests.rs"]
mod ast_tests;

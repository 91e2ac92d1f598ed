//! Go scanner/tokenizer for the genum generator.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with automatic semicolon insertion
//! - `Comment` - Comment ranges collected while scanning

pub mod comments;
pub mod scanner;
pub mod syntax_kind;

pub use comments::Comment;
pub use scanner::{ScanDiagnostic, ScannerState, Token};
pub use syntax_kind::*;

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
#[cfg(test)]
#[path = "tests/syntax_kind_tests.rs"]
mod syntax_kind_tests;

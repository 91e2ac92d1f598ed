//! Error types.
//!
//! Every failure is fatal for the run. Wrapping variants keep the underlying
//! error as their source, so the full chain reads
//! `failed to parse enum Color: type Color not found`.

use std::io;
use thiserror::Error;

/// A malformed `//go:generate genum` directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("-type=<type> is required")]
    MissingType,
    #[error("invalid argument -case: {0}")]
    InvalidCase(String),
}

/// Failure to build an enum from the package's declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("type {0} not found")]
    TypeNotFound(String),
    #[error("no values found for enum {0}")]
    NoValues(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("unsupported base type {base_type} of enum {type_name}")]
    UnsupportedBaseType {
        type_name: String,
        base_type: String,
    },
}

#[derive(Debug, Error)]
pub enum GenumError {
    #[error("package not found")]
    PackageNotFound,
    #[error("multiple packages found: {}", .0.join(", "))]
    MultiplePackages(Vec<String>),
    #[error("{file} not find in package {package}")]
    FileNotInPackage { file: String, package: String },
    #[error("read {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Directive(#[from] DirectiveError),
    #[error("no genum directives found")]
    NoDirectives,
    #[error("failed to parse enum {type_name}")]
    Enum {
        type_name: String,
        #[source]
        source: ExtractError,
    },
    #[error("generate {output}")]
    Generate {
        output: String,
        #[source]
        source: RenderError,
    },
    #[error("write {output}")]
    Write {
        output: String,
        #[source]
        source: io::Error,
    },
}

//! `//go:generate genum` directive parsing.
//!
//! A directive is a single comment line:
//!
//! ```text
//! //go:generate genum -type=Color -output=color_enum.go -trimprefix=Color -case=ignore
//! ```
//!
//! Everything after the marker is split on whitespace into `key=value`
//! tokens. Unknown keys are accepted and ignored so that newer directives
//! keep working with older generators.

use crate::error::DirectiveError;
use crate::model::CaseHandling;
use indexmap::IndexMap;
use serde::Serialize;

/// Marker every directive starts with, trailing space included.
pub const DIRECTIVE_PREFIX: &str = "//go:generate genum ";

const OUTPUT_SUFFIX: &str = "_genum.go";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub type_name: String,
    /// Output path, relative to the package directory
    pub output: String,
    pub trim_prefix: String,
    pub case: CaseHandling,
}

/// Whether `comment` (surrounding whitespace ignored) is a genum directive.
pub fn is_genum_directive(comment: &str) -> bool {
    comment.trim().starts_with(DIRECTIVE_PREFIX)
}

/// Parse a comment line into a directive.
///
/// Returns `Ok(None)` for comments that are not genum directives.
pub fn parse_from_comment(
    comment: &str,
    source_file: &str,
) -> Result<Option<Directive>, DirectiveError> {
    let comment = comment.trim();
    if !is_genum_directive(comment) {
        return Ok(None);
    }

    let mut flags = parse_flags(comment)?;
    let mut take = |key: &str| flags.swap_remove(key).unwrap_or_default();

    let type_name = take("-type");
    let output = take("-output");
    let trim_prefix = take("-trimprefix");
    let case = take("-case");

    if type_name.is_empty() {
        return Err(DirectiveError::MissingType);
    }
    let output = if output.is_empty() {
        default_output(source_file)
    } else {
        output
    };
    let trim_prefix = if trim_prefix.is_empty() {
        type_name.clone()
    } else {
        trim_prefix
    };
    let case = if case.is_empty() {
        CaseHandling::Sensitive
    } else {
        CaseHandling::from_flag(&case).ok_or(DirectiveError::InvalidCase(case))?
    };

    Ok(Some(Directive {
        type_name,
        output,
        trim_prefix,
        case,
    }))
}

/// Split the arguments of a directive into `key -> value`.
///
/// Keys keep their leading dash. A repeated key keeps its last value.
pub fn parse_flags(comment: &str) -> Result<IndexMap<String, String>, DirectiveError> {
    let comment = comment.trim();
    let arguments = comment.strip_prefix(DIRECTIVE_PREFIX).unwrap_or(comment);

    let mut flags = IndexMap::new();
    for token in arguments.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            return Err(DirectiveError::InvalidArgument(token.to_string()));
        };
        flags.insert(key.to_string(), strip_quotes(value).to_string());
    }
    Ok(flags)
}

/// Output file name derived from the processed source file:
/// `color.go` becomes `color_genum.go`.
pub fn default_output(source_file: &str) -> String {
    let stem = source_file.strip_suffix(".go").unwrap_or(source_file);
    format!("{stem}{OUTPUT_SUFFIX}")
}

/// Strip one matching pair of surrounding quotes. Unbalanced or mixed
/// quotes are kept as written.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
#[path = "tests/directive_tests.rs"]
mod directive_tests;

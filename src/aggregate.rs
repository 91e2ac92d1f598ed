//! Directive discovery and grouping of enums into output files.

use crate::directive::{Directive, parse_from_comment};
use crate::error::{DirectiveError, GenumError};
use crate::extractor::extract_enum;
use crate::loader::Package;
use crate::model::GenerationUnit;
use genum_parser::{GenDecl, Visitor};
use indexmap::IndexMap;
use tracing::debug;

/// Collects directives from the doc comments of top-level declarations.
/// Stops at the first malformed directive.
struct DirectiveCollector<'a> {
    source_file: &'a str,
    directives: Vec<Directive>,
    error: Option<DirectiveError>,
}

impl Visitor for DirectiveCollector<'_> {
    fn visit_gen_decl(&mut self, decl: &GenDecl) {
        if self.error.is_some() {
            return;
        }
        let Some(doc) = &decl.doc else {
            return;
        };
        for comment in doc.iter() {
            match parse_from_comment(comment, self.source_file) {
                Ok(Some(directive)) => {
                    debug!(type_name = %directive.type_name, output = %directive.output, "directive");
                    self.directives.push(directive);
                }
                Ok(None) => {}
                Err(err) => {
                    self.error = Some(err);
                    return;
                }
            }
        }
    }
}

/// Directives of the package's target file, in source order.
pub fn collect_directives(package: &Package) -> Result<Vec<Directive>, DirectiveError> {
    let mut collector = DirectiveCollector {
        source_file: package.target_file_name(),
        directives: Vec::new(),
        error: None,
    };
    collector.visit_file(package.target_file());
    match collector.error {
        Some(err) => Err(err),
        None => Ok(collector.directives),
    }
}

/// Extract every directive's enum and group the results by output file.
pub fn aggregate(package: &Package) -> Result<Vec<GenerationUnit>, GenumError> {
    let directives = collect_directives(package)?;
    if directives.is_empty() {
        return Err(GenumError::NoDirectives);
    }

    let mut units: IndexMap<String, GenerationUnit> = IndexMap::new();
    for directive in &directives {
        let enumeration =
            extract_enum(package, directive).map_err(|source| GenumError::Enum {
                type_name: directive.type_name.clone(),
                source,
            })?;

        let unit = units
            .entry(directive.output.clone())
            .or_insert_with(|| GenerationUnit {
                package: package.name.clone(),
                source: package.target_file_name().to_string(),
                output: directive.output.clone(),
                needs_strings: false,
                enums: Vec::new(),
            });
        unit.needs_strings |= enumeration.needs_strings();
        unit.enums.push(enumeration);
    }

    Ok(units.into_values().collect())
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod aggregate_tests;

//! Go source rendering.
//!
//! For every enum `T` the generated file declares `TValues`, `T.String`,
//! `T.IsValid` and, for string-based enums, `ParseT`. Switches list each
//! distinct value once, first declaration first, so the generated code never
//! repeats a constant case.

use crate::emitter::printer::GoPrinter;
use crate::error::RenderError;
use crate::model::{CaseHandling, Enum, EnumValue, GenerationUnit};
use genum_checker::ConstValue;
use genum_checker::constant::{parse_float_literal, parse_int_literal, parse_rune_literal};
use indexmap::IndexSet;

/// Render a whole output file. The result ends with exactly one newline.
pub fn render_unit(unit: &GenerationUnit) -> Result<String, RenderError> {
    let mut printer = GoPrinter::new();
    printer.line(&format!(
        "// Code generated by genum from {}; DO NOT EDIT.",
        unit.source
    ));
    printer.line("");
    printer.line(&format!("package {}", unit.package));
    printer.line("");
    printer.line("import (");
    printer.increase_indent();
    printer.line("\"fmt\"");
    if unit.needs_strings {
        printer.line("\"strings\"");
    }
    printer.decrease_indent();
    printer.line(")");

    for enumeration in &unit.enums {
        render_enum(&mut printer, enumeration)?;
    }

    Ok(format!("{}\n", printer.finish().trim()))
}

/// Render the helpers of one enum, each preceded by a blank line.
pub fn render_enum(printer: &mut GoPrinter, enumeration: &Enum) -> Result<(), RenderError> {
    if !enumeration.base_type.is_basic() {
        return Err(RenderError::UnsupportedBaseType {
            type_name: enumeration.type_name.clone(),
            base_type: enumeration.base_type.to_string(),
        });
    }

    let distinct = distinct_values(&enumeration.values, !enumeration.base_type.is_string());
    render_values(printer, enumeration);
    render_string(printer, enumeration, &distinct);
    render_is_valid(printer, enumeration, &distinct);
    if enumeration.base_type.is_string() {
        render_parse(printer, enumeration, &distinct);
    }
    Ok(())
}

fn render_values(printer: &mut GoPrinter, enumeration: &Enum) {
    let name = &enumeration.type_name;
    printer.line("");
    printer.line(&format!("// {name}Values returns all declared {name} values."));
    printer.block(&format!("func {name}Values() []{name}"), |p| {
        p.line(&format!("return []{name}{{"));
        p.increase_indent();
        for value in &enumeration.values {
            p.line(&format!("{},", value.name));
        }
        p.decrease_indent();
        p.line("}");
    });
}

fn render_string(printer: &mut GoPrinter, enumeration: &Enum, distinct: &[&EnumValue]) {
    let name = &enumeration.type_name;
    let is_string = enumeration.base_type.is_string();
    printer.line("");
    printer.line(&format!("// String returns the text of the {name} value."));
    printer.block(&format!("func (e {name}) String() string"), |p| {
        p.line("switch e {");
        for value in distinct {
            p.line(&format!("case {}:", value.name));
            p.increase_indent();
            if is_string {
                p.line(&format!("return \"{}\"", value.value));
            } else {
                p.line(&format!("return \"{}\"", enumeration.display_name(value)));
            }
            p.decrease_indent();
        }
        p.line("}");
        if is_string {
            p.line("return string(e)");
        } else {
            p.line(&format!(
                "return fmt.Sprintf(\"{name}(%v)\", {}(e))",
                enumeration.base_type
            ));
        }
    });
}

fn render_is_valid(printer: &mut GoPrinter, enumeration: &Enum, distinct: &[&EnumValue]) {
    let name = &enumeration.type_name;
    let cases: Vec<&str> = distinct.iter().map(|value| value.name.as_str()).collect();
    printer.line("");
    printer.line(&format!("// IsValid reports whether e is a declared {name} value."));
    printer.block(&format!("func (e {name}) IsValid() bool"), |p| {
        p.line("switch e {");
        p.line(&format!("case {}:", cases.join(", ")));
        p.increase_indent();
        p.line("return true");
        p.decrease_indent();
        p.line("}");
        p.line("return false");
    });
}

fn render_parse(printer: &mut GoPrinter, enumeration: &Enum, distinct: &[&EnumValue]) {
    let name = &enumeration.type_name;
    printer.line("");
    printer.line(&format!("// Parse{name} returns the {name} value whose text is s."));
    printer.block(&format!("func Parse{name}(s string) ({name}, error)"), |p| {
        match enumeration.case {
            CaseHandling::Sensitive => {
                p.line("switch s {");
                for value in distinct {
                    parse_case(p, &format!("\"{}\"", value.value), &value.name);
                }
            }
            CaseHandling::Ignore => {
                p.line("switch {");
                for value in distinct {
                    let test = format!("strings.EqualFold(s, \"{}\")", value.value);
                    parse_case(p, &test, &value.name);
                }
            }
            CaseHandling::Lower | CaseHandling::Upper => {
                let func = if enumeration.case == CaseHandling::Lower {
                    "strings.ToLower"
                } else {
                    "strings.ToUpper"
                };
                p.line(&format!("switch {func}(s) {{"));
                for value in distinct {
                    let test = format!("{func}(string({}))", value.name);
                    parse_case(p, &test, &value.name);
                }
            }
        }
        p.line("}");
        p.line(&format!("return \"\", fmt.Errorf(\"invalid {name}: %q\", s)"));
    });
}

fn parse_case(printer: &mut GoPrinter, test: &str, constant: &str) {
    printer.line(&format!("case {test}:"));
    printer.increase_indent();
    printer.line(&format!("return {constant}, nil"));
    printer.decrease_indent();
}

/// First value of each distinct literal, in declaration order. Numeric
/// literals are compared by value unless the enum is string based.
fn distinct_values(values: &[EnumValue], numeric: bool) -> Vec<&EnumValue> {
    let mut seen = IndexSet::new();
    values
        .iter()
        .filter(|value| {
            let key = if numeric {
                numeric_key(&value.value).unwrap_or_else(|| value.value.clone())
            } else {
                value.value.clone()
            };
            seen.insert(key)
        })
        .collect()
}

/// Canonical text of a numeric literal: `0x1`, `1` and `1.0` share a key.
fn numeric_key(text: &str) -> Option<String> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '\'') {
        return None;
    }
    let value = match parse_int_literal(body).or_else(|| parse_rune_literal(body)) {
        Some(int) => ConstValue::Int(if negative { -int } else { int }),
        None => {
            let float = parse_float_literal(body)?;
            ConstValue::Float(if negative { -float } else { float })
        }
    };
    Some(value.to_go_text())
}

#[cfg(test)]
#[path = "../tests/renderer_tests.rs"]
mod renderer_tests;

//! Tests for emitter/printer.rs

use super::*;

#[test]
fn test_line_indents_with_tabs() {
    let mut printer = GoPrinter::new();
    printer.line("func f() {");
    printer.increase_indent();
    printer.line("return");
    printer.line("");
    printer.decrease_indent();
    printer.line("}");
    assert_eq!(printer.get_output(), "func f() {\n\treturn\n\n}\n");
}

#[test]
fn test_decrease_indent_saturates() {
    let mut printer = GoPrinter::new();
    printer.decrease_indent();
    printer.line("x");
    assert_eq!(printer.finish(), "x\n");
}

#[test]
fn test_nested_blocks() {
    let mut printer = GoPrinter::new();
    printer.block("func f()", |p| {
        p.block("switch e", |p| {
            p.line("case A:");
        });
    });
    assert_eq!(
        printer.finish(),
        "func f() {\n\tswitch e {\n\t\tcase A:\n\t}\n}\n"
    );
}

//! Integration tests for package checking.

use genum_checker::*;
use genum_parser::{ParserState, SourceFile};

fn parse(name: &str, source: &str) -> SourceFile {
    ParserState::new(name.to_string(), source.to_string()).parse_source_file()
}

fn check(sources: &[&str]) -> TypeInfo {
    let files: Vec<SourceFile> = sources
        .iter()
        .enumerate()
        .map(|(index, source)| parse(&format!("file{index}.go"), source))
        .collect();
    check_package(&files)
}

fn constant<'a>(info: &'a TypeInfo, name: &str) -> &'a ConstInfo {
    let (_, object) = info.lookup(name).expect("declared name");
    info.const_at(object.file, object.pos).expect("constant info")
}

fn type_id(info: &TypeInfo, name: &str) -> TypeId {
    let (id, object) = info.lookup(name).expect("declared name");
    assert!(object.is_type_name());
    info.type_of(id).expect("type")
}

fn has_diagnostic(info: &TypeInfo, text: &str) -> bool {
    info.diagnostics()
        .iter()
        .any(|diag| diag.message.contains(text))
}

#[test]
fn test_iota_with_implicit_repetition() {
    let info = check(&["package p\n\ntype Color int\n\nconst (\n\tRed Color = iota\n\tGreen\n\tBlue\n)\n"]);
    let color = type_id(&info, "Color");
    for (name, value) in [("Red", 0), ("Green", 1), ("Blue", 2)] {
        let constant = constant(&info, name);
        assert_eq!(constant.ty, Some(color), "{name}");
        assert_eq!(constant.value, Some(ConstValue::Int(value)), "{name}");
    }
    assert!(info.diagnostics().is_empty());
}

#[test]
fn test_iota_expression_skipping_blank() {
    let info = check(&[
        "package p\n\ntype Size int64\n\nconst (\n\t_ = iota\n\tKB Size = 1 << (10 * iota)\n\tMB\n\tGB\n)\n",
    ]);
    assert_eq!(constant(&info, "KB").value, Some(ConstValue::Int(1024)));
    assert_eq!(constant(&info, "MB").value, Some(ConstValue::Int(1 << 20)));
    assert_eq!(constant(&info, "GB").value, Some(ConstValue::Int(1 << 30)));
}

#[test]
fn test_typed_string_constants_and_conversions() {
    let info = check(&[
        "package p\n\ntype Status string\n\nconst (\n\tActive Status = \"active\"\n\tPending = Status(\"pending\")\n)\n",
    ]);
    let status = type_id(&info, "Status");
    assert_eq!(constant(&info, "Active").ty, Some(status));
    assert_eq!(constant(&info, "Pending").ty, Some(status));
    assert_eq!(
        constant(&info, "Pending").value,
        Some(ConstValue::String("pending".to_string()))
    );
}

#[test]
fn test_untyped_constant_keeps_untyped_type() {
    let info = check(&["package p\nconst N = 5\nconst S = \"x\"\n"]);
    let interner = info.interner();
    assert_eq!(
        constant(&info, "N").ty,
        Some(interner.basic(BasicKind::UntypedInt))
    );
    assert_eq!(
        constant(&info, "S").ty,
        Some(interner.basic(BasicKind::UntypedString))
    );
}

#[test]
fn test_constant_reference_across_files() {
    let info = check(&[
        "package p\n\ntype Level int\n\nconst Debug Level = Base + 1\n",
        "package p\n\nconst Base = 10\n",
    ]);
    let debug = constant(&info, "Debug");
    assert_eq!(debug.value, Some(ConstValue::Int(11)));
    assert_eq!(debug.ty, Some(type_id(&info, "Level")));
    assert_eq!(info.lookup("Base").map(|(_, object)| object.file), Some(1));
}

#[test]
fn test_distinct_named_types_with_same_underlying() {
    let info = check(&["package p\ntype A int\ntype B int\nconst X A = 1\nconst Y B = 1\n"]);
    let a = type_id(&info, "A");
    let b = type_id(&info, "B");
    assert_ne!(a, b);
    assert_eq!(constant(&info, "X").ty, Some(a));
    assert_eq!(constant(&info, "Y").ty, Some(b));
    assert_eq!(info.underlying(a), info.underlying(b));
}

#[test]
fn test_alias_has_its_own_identity() {
    let info = check(&["package p\ntype Color int\ntype Shade = Color\nconst X Shade = 1\n"]);
    let color = type_id(&info, "Color");
    let shade = type_id(&info, "Shade");
    assert_ne!(color, shade);
    assert_eq!(constant(&info, "X").ty, Some(shade));
    assert_eq!(info.unalias(shade), color);
    assert_eq!(info.classify(shade), TypeClass::Basic(BasicKind::Int));
}

#[test]
fn test_classification() {
    let info = check(&[
        "package p\n\ntype (\n\tName string\n\tSmall Tiny\n\tTiny byte\n\tPtr *Node\n\tNode struct {\n\t\tnext *Node\n\t}\n\tEmpty struct{}\n\tList []int\n\tGeneric[T any] []T\n)\n",
    ]);
    let class = |name: &str| info.classify(type_id(&info, name));
    assert_eq!(class("Name"), TypeClass::Basic(BasicKind::String));
    assert_eq!(class("Small"), TypeClass::Basic(BasicKind::Byte));
    assert_eq!(class("Ptr"), TypeClass::Pointer(Box::new(TypeClass::Struct)));
    assert_eq!(class("Empty"), TypeClass::Struct);
    assert_eq!(class("List"), TypeClass::Other);
    assert_eq!(class("Generic"), TypeClass::Other);
    assert!(info.diagnostics().is_empty(), "{:?}", info.diagnostics());
}

#[test]
fn test_overflow_keeps_declared_type() {
    let info = check(&["package p\nconst X uint8 = 256\n"]);
    let x = constant(&info, "X");
    assert_eq!(x.ty, Some(info.interner().basic(BasicKind::Uint8)));
    assert_eq!(x.value, None);
    assert!(has_diagnostic(&info, "overflows"));
}

#[test]
fn test_initialization_cycle() {
    let info = check(&["package p\nconst A = B\nconst B = A\n"]);
    assert_eq!(constant(&info, "A").value, None);
    assert_eq!(constant(&info, "B").value, None);
    assert!(has_diagnostic(&info, "initialization cycle"));
}

#[test]
fn test_imported_names_are_opaque() {
    let info = check(&[
        "package p\n\nimport \"time\"\n\ntype Timeout time.Duration\n\nconst Short = time.Second\n",
    ]);
    let short = constant(&info, "Short");
    assert_eq!(short.ty, None);
    assert_eq!(short.value, None);
    assert_eq!(info.classify(type_id(&info, "Timeout")), TypeClass::Other);
    assert!(info.diagnostics().is_empty());
}

#[test]
fn test_invalid_recursive_type() {
    let info = check(&["package p\ntype T T\n"]);
    assert!(has_diagnostic(&info, "invalid recursive type T"));
}

#[test]
fn test_float_and_boolean_expressions() {
    let info = check(&["package p\nconst F = 1.5 * 2\nconst B = 2 > 1 && \"a\" < \"b\"\nconst Q = 7 / 2\n"]);
    assert_eq!(constant(&info, "F").value, Some(ConstValue::Float(3.0)));
    assert_eq!(constant(&info, "B").value, Some(ConstValue::Bool(true)));
    assert_eq!(constant(&info, "Q").value, Some(ConstValue::Int(3)));
}

#[test]
fn test_string_concatenation_and_len() {
    let info = check(&["package p\nconst S = \"ab\" + \"c\"\nconst L = len(S)\n"]);
    assert_eq!(
        constant(&info, "S").value,
        Some(ConstValue::String("abc".to_string()))
    );
    let l = constant(&info, "L");
    assert_eq!(l.value, Some(ConstValue::Int(3)));
    assert_eq!(l.ty, Some(info.interner().basic(BasicKind::Int)));
}

#[test]
fn test_rune_to_string_conversion() {
    let info = check(&["package p\nconst R = string(rune(65))\n"]);
    assert_eq!(
        constant(&info, "R").value,
        Some(ConstValue::String("A".to_string()))
    );
}

#[test]
fn test_mismatched_typed_operands() {
    let info = check(&["package p\ntype A int\ntype B int\nconst X = A(1) + B(2)\n"]);
    assert_eq!(constant(&info, "X").value, None);
    assert!(has_diagnostic(&info, "mismatched types A and B"));
}

#[test]
fn test_unsigned_complement() {
    let info = check(&["package p\nconst M uint8 = ^uint8(0)\nconst N = ^0\n"]);
    assert_eq!(constant(&info, "M").value, Some(ConstValue::Int(255)));
    assert_eq!(constant(&info, "N").value, Some(ConstValue::Int(-1)));
}

#[test]
fn test_negated_iota() {
    let info = check(&["package p\ntype Offset int\nconst (\n\tZero Offset = -iota\n\tMinusOne\n)\n"]);
    assert_eq!(constant(&info, "MinusOne").value, Some(ConstValue::Int(-1)));
}

#[test]
fn test_redeclaration_is_reported() {
    let info = check(&["package p\nconst A = 1\n", "package p\nconst A = 2\n"]);
    assert!(has_diagnostic(&info, "A redeclared in this block"));
    assert_eq!(constant(&info, "A").value, Some(ConstValue::Int(1)));
}

#[test]
fn test_methods_and_vars_are_not_constants() {
    let info = check(&["package p\ntype T int\nvar V = 1\nfunc (T) M() {}\nfunc F() {}\n"]);
    let (_, v) = info.lookup("V").expect("var");
    assert_eq!(v.kind, ObjectKind::Var);
    let (_, f) = info.lookup("F").expect("func");
    assert_eq!(f.kind, ObjectKind::Func);
    assert!(info.lookup("M").is_none());
}

//! Integration tests for the Go declaration parser.

use genum_parser::*;

fn parse(source: &str) -> (SourceFile, Vec<ParseDiagnostic>) {
    let mut parser = ParserState::new("test.go".to_string(), source.to_string());
    let file = parser.parse_source_file();
    (file, parser.get_diagnostics().to_vec())
}

fn parse_ok(source: &str) -> SourceFile {
    let (file, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    file
}

fn first_const_value(file: &SourceFile) -> Expr {
    let decl = file
        .gen_decls()
        .find(|decl| decl.kind == DeclKind::Const)
        .expect("const declaration");
    decl.const_entries()[0].value.expect("initialiser").clone()
}

const COLORS: &str = r#"package colors

import "fmt"

// Color is a color.
//go:generate genum -type=Color
type Color int

const (
	Red Color = iota
	Green
	Blue
)

func (c Color) Describe() string {
	return fmt.Sprintf("color %d", c)
}
"#;

#[test]
fn test_package_clause() {
    let file = parse_ok(COLORS);
    assert_eq!(file.package.name, "colors");
    assert_eq!(file.file_name, "test.go");
}

#[test]
fn test_declaration_kinds_in_order() {
    let file = parse_ok(COLORS);
    let kinds: Vec<&str> = file
        .decls
        .iter()
        .map(|decl| match decl {
            Decl::Gen(decl) => match decl.kind {
                DeclKind::Import => "import",
                DeclKind::Const => "const",
                DeclKind::Type => "type",
                DeclKind::Var => "var",
            },
            Decl::Func(_) => "func",
            Decl::Bad(_) => "bad",
        })
        .collect();
    assert_eq!(kinds, vec!["import", "type", "const", "func"]);
}

#[test]
fn test_doc_comment_group_attached_to_type_decl() {
    let file = parse_ok(COLORS);
    let decl = file
        .gen_decls()
        .find(|decl| decl.kind == DeclKind::Type)
        .expect("type declaration");
    let doc: Vec<&str> = decl.doc.as_ref().expect("doc comment").iter().collect();
    assert_eq!(
        doc,
        vec!["// Color is a color.", "//go:generate genum -type=Color"]
    );
}

#[test]
fn test_comment_separated_by_blank_line_is_not_doc() {
    let file = parse_ok("package p\n\n// detached\n\nconst A = 1\n");
    let decl = file.gen_decls().next().expect("const declaration");
    assert!(decl.doc.is_none());
}

#[test]
fn test_trailing_comment_is_not_doc_of_next_decl() {
    let file = parse_ok("package p\nconst A = 1 // about A\nconst B = 2\n");
    let decls: Vec<&GenDecl> = file.gen_decls().collect();
    assert!(decls[1].doc.is_none());
}

#[test]
fn test_doc_group_stops_at_blank_line() {
    let file = parse_ok("package p\n\n// one\n\n// two\n// three\ntype T string\n");
    let decl = file.gen_decls().next().expect("type declaration");
    let doc: Vec<&str> = decl.doc.as_ref().expect("doc comment").iter().collect();
    assert_eq!(doc, vec!["// two", "// three"]);
}

#[test]
fn test_func_decl_with_receiver_and_body_skipped() {
    let file = parse_ok(COLORS);
    let func = file
        .decls
        .iter()
        .find_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            _ => None,
        })
        .expect("func declaration");
    assert_eq!(func.name.name, "Describe");
    assert!(func.has_receiver);
}

#[test]
fn test_import_specs() {
    let file = parse_ok("package p\n\nimport (\n\t\"fmt\"\n\tstr \"strings\"\n\t. \"os\"\n)\n");
    let decl = file.gen_decls().next().expect("import declaration");
    assert!(decl.grouped);
    let imports: Vec<(Option<&str>, &str)> = decl
        .specs
        .iter()
        .map(|spec| match spec {
            Spec::Import(spec) => (spec.name.as_ref().map(|n| n.name.as_str()), spec.path.as_str()),
            _ => panic!("expected import spec"),
        })
        .collect();
    assert_eq!(
        imports,
        vec![(None, "fmt"), (Some("str"), "strings"), (Some("."), "os")]
    );
}

#[test]
fn test_type_specs() {
    let file = parse_ok(
        "package p\n\ntype (\n\tA = B\n\tP *int\n\tE struct{}\n\tS struct {\n\t\tx int\n\t}\n\tL[T any] []T\n\tN [4]int\n\tM map[string]int\n)\n",
    );
    let decl = file.gen_decls().next().expect("type declaration");
    let specs: Vec<&TypeSpec> = decl
        .specs
        .iter()
        .filter_map(|spec| match spec {
            Spec::Type(spec) => Some(spec),
            _ => None,
        })
        .collect();
    assert_eq!(specs.len(), 7);

    assert!(specs[0].alias);
    assert!(matches!(&specs[0].ty, TypeExpr::Name(name) if name.name == "B"));
    assert!(matches!(&specs[1].ty, TypeExpr::Pointer(inner) if matches!(**inner, TypeExpr::Name(_))));
    assert_eq!(specs[2].ty, TypeExpr::Struct { empty: true });
    assert_eq!(specs[3].ty, TypeExpr::Struct { empty: false });
    assert!(specs[4].type_params);
    assert!(matches!(&specs[4].ty, TypeExpr::Slice(_)));
    assert!(!specs[5].type_params);
    assert!(matches!(&specs[5].ty, TypeExpr::Array { len: Some(_), .. }));
    assert!(matches!(&specs[6].ty, TypeExpr::Map { .. }));
}

#[test]
fn test_qualified_type() {
    let file = parse_ok("package p\ntype D time.Duration\n");
    let decl = file.gen_decls().next().expect("type declaration");
    let Spec::Type(spec) = &decl.specs[0] else {
        panic!("expected type spec");
    };
    assert!(matches!(
        &spec.ty,
        TypeExpr::Qualified { package, name } if package.name == "time" && name.name == "Duration"
    ));
}

#[test]
fn test_binary_precedence() {
    let file = parse_ok("package p\nconst A = 1 << 2 + 3 * 4\n");
    let Expr::Binary { op, left, right } = first_const_value(&file) else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(*left, Expr::Binary { op: BinaryOp::Shl, .. }));
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
}

#[test]
fn test_unary_and_logical_operators() {
    let file = parse_ok("package p\nconst A = !true || -1 < ^2 && false\n");
    let Expr::Binary { op, left, right } = first_const_value(&file) else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinaryOp::LogicalOr);
    assert!(matches!(*left, Expr::Unary { op: UnaryOp::Not, .. }));
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::LogicalAnd, .. }));
}

#[test]
fn test_conversion_call() {
    let file = parse_ok("package p\nconst Pending = Status(\"pending\")\n");
    let Expr::Call { fun, args, ellipsis } = first_const_value(&file) else {
        panic!("expected call expression");
    };
    assert!(matches!(*fun, Expr::Ident(ref ident) if ident.name == "Status"));
    assert!(!ellipsis);
    assert!(matches!(&args[0], Expr::BasicLit(lit) if lit.kind == LitKind::String && lit.value == "\"pending\""));
}

#[test]
fn test_selector_and_literal_kinds() {
    let file = parse_ok("package p\nconst (\n\tA = time.Second\n\tB = 'x'\n\tC = 1.5\n\tD = `raw`\n)\n");
    let decl = file.gen_decls().next().expect("const declaration");
    let entries = decl.const_entries();
    assert!(matches!(
        entries[0].value,
        Some(Expr::Selector { sel, .. }) if sel.name == "Second"
    ));
    assert!(matches!(entries[1].value, Some(Expr::BasicLit(lit)) if lit.kind == LitKind::Rune));
    assert!(matches!(entries[2].value, Some(Expr::BasicLit(lit)) if lit.kind == LitKind::Float));
    assert!(matches!(entries[3].value, Some(Expr::BasicLit(lit)) if lit.value == "`raw`"));
}

#[test]
fn test_typed_const_spec() {
    let file = parse_ok("package p\nconst Max uint8 = 255\n");
    let decl = file.gen_decls().next().expect("const declaration");
    assert!(!decl.grouped);
    let Spec::Value(spec) = &decl.specs[0] else {
        panic!("expected value spec");
    };
    assert!(matches!(&spec.ty, Some(TypeExpr::Name(name)) if name.name == "uint8"));
    assert_eq!(spec.values.len(), 1);
}

#[test]
fn test_var_initialisers_are_skipped() {
    let file = parse_ok(
        "package p\n\nvar (\n\tnames = map[string]int{\n\t\t\"a\": 1,\n\t}\n\tf = func() int { return 1 }\n)\n\nconst A = 1\n",
    );
    let decls: Vec<&GenDecl> = file.gen_decls().collect();
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].specs.len(), 2);
    let Spec::Value(spec) = &decls[0].specs[0] else {
        panic!("expected value spec");
    };
    assert_eq!(spec.names[0].name, "names");
    assert!(spec.values.is_empty());
    assert_eq!(decls[1].kind, DeclKind::Const);
}

#[test]
fn test_function_bodies_never_produce_diagnostics() {
    parse_ok(
        "package p\n\nfunc f(x int) (int, error) {\n\tif x > 0 {\n\t\tfor i := range x { _ = i }\n\t}\n\tswitch {\n\tcase x < 0:\n\t\treturn 0, nil\n\t}\n\treturn x, nil\n}\n\nfunc g[T any](v T) T { return v }\n",
    );
}

#[test]
fn test_recovers_after_malformed_declaration() {
    let (file, diagnostics) = parse("package p\nconst = 1\nconst B = 2\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line, 2);
    assert!(diagnostics[0].message.starts_with("expected identifier"));
    let decls: Vec<&GenDecl> = file.gen_decls().collect();
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[1].const_entries()[0].name.name, "B");
}

#[test]
fn test_recovers_inside_group() {
    let (file, diagnostics) = parse("package p\nconst (\n\tA = )\n\tB = 2\n)\nconst C = 3\n");
    assert!(!diagnostics.is_empty());
    let names: Vec<String> = file
        .gen_decls()
        .flat_map(|decl| decl.const_entries())
        .map(|entry| entry.name.name.clone())
        .collect();
    assert!(names.contains(&"C".to_string()));
}

#[test]
fn test_missing_package_clause() {
    let (file, diagnostics) = parse("const A = 1\n");
    assert_eq!(file.package.name, "");
    assert!(diagnostics[0].message.contains("'package'"));
}

#[test]
fn test_unterminated_string_is_reported() {
    let (_, diagnostics) = parse("package p\nconst A = \"abc\n");
    assert!(
        diagnostics
            .iter()
            .any(|diag| diag.message == "string literal not terminated")
    );
}

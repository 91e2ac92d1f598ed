//! Tests for directive.rs

use super::*;

fn parse(comment: &str, source_file: &str) -> Directive {
    parse_from_comment(comment, source_file)
        .expect("directive should parse")
        .expect("comment should be a directive")
}

#[test]
fn test_parse_all_flags() {
    let directive = parse(
        "//go:generate genum -type=Status -output=status_gen.go -trimprefix=Status_",
        "types.go",
    );
    assert_eq!(directive.type_name, "Status");
    assert_eq!(directive.output, "status_gen.go");
    assert_eq!(directive.trim_prefix, "Status_");
    assert_eq!(directive.case, CaseHandling::Sensitive);
}

#[test]
fn test_parse_quoted_values() {
    for comment in [
        r#"//go:generate genum -type="Status" -output="status_gen.go" -trimprefix="Status_""#,
        "//go:generate genum -type='Status' -output='status_gen.go' -trimprefix='Status_'",
    ] {
        let directive = parse(comment, "types.go");
        assert_eq!(directive.type_name, "Status");
        assert_eq!(directive.output, "status_gen.go");
        assert_eq!(directive.trim_prefix, "Status_");
    }
}

#[test]
fn test_parse_defaults() {
    let directive = parse("//go:generate genum -type=Color", "color.go");
    assert_eq!(directive.output, "color_genum.go");
    assert_eq!(directive.trim_prefix, "Color");
    assert_eq!(directive.case, CaseHandling::Sensitive);

    let directive = parse("//go:generate genum -type=Role -output=role_gen.go", "user.go");
    assert_eq!(directive.output, "role_gen.go");
    assert_eq!(directive.trim_prefix, "Role");
}

#[test]
fn test_parse_flag_order_and_spacing() {
    let directive = parse(
        "//go:generate genum -output=test.go -trimprefix=Test_ -type=TestType",
        "test.go",
    );
    assert_eq!(directive.type_name, "TestType");
    assert_eq!(directive.output, "test.go");
    assert_eq!(directive.trim_prefix, "Test_");

    let directive = parse(
        "   //go:generate genum   -type=Status   -output=status.go   -trimprefix=Status_   ",
        "types.go",
    );
    assert_eq!(directive.type_name, "Status");
    assert_eq!(directive.output, "status.go");
    assert_eq!(directive.trim_prefix, "Status_");
}

#[test]
fn test_parse_value_with_equals() {
    let directive = parse(
        "//go:generate genum -type=Complex=Type -output=file=with=equals.go",
        "test.go",
    );
    assert_eq!(directive.type_name, "Complex=Type");
    assert_eq!(directive.output, "file=with=equals.go");
    assert_eq!(directive.trim_prefix, "Complex=Type");
}

#[test]
fn test_parse_case_modes() {
    for (flag, expected) in [
        ("sensitive", CaseHandling::Sensitive),
        ("ignore", CaseHandling::Ignore),
        ("lower", CaseHandling::Lower),
        ("upper", CaseHandling::Upper),
    ] {
        let comment = format!("//go:generate genum -type=Role -case={flag}");
        assert_eq!(parse(&comment, "role.go").case, expected);
    }

    let directive = parse("//go:generate genum -type=Role -case=", "role.go");
    assert_eq!(directive.case, CaseHandling::Sensitive);
}

#[test]
fn test_parse_invalid_case() {
    let err = parse_from_comment("//go:generate genum -type=Role -case=foobar", "role.go")
        .expect_err("unknown case mode should fail");
    assert_eq!(err, DirectiveError::InvalidCase("foobar".to_string()));
    assert_eq!(err.to_string(), "invalid argument -case: foobar");
}

#[test]
fn test_parse_missing_type() {
    for comment in [
        "//go:generate genum -output=test.go",
        "//go:generate genum -type=",
        r#"//go:generate genum -type="""#,
    ] {
        let err = parse_from_comment(comment, "test.go").expect_err("type is required");
        assert_eq!(err.to_string(), "-type=<type> is required");
    }
}

#[test]
fn test_parse_argument_without_equals() {
    let err = parse_from_comment("//go:generate genum -type", "test.go")
        .expect_err("bare flag should fail");
    assert_eq!(err.to_string(), "invalid argument: -type");
}

#[test]
fn test_not_a_directive() {
    for comment in [
        "//go:generate stringer -type=Status",
        "// This is a regular comment",
        "",
        "   ",
    ] {
        assert_eq!(parse_from_comment(comment, "types.go"), Ok(None));
    }
}

#[test]
fn test_is_genum_directive() {
    assert!(is_genum_directive("//go:generate genum -type=Status"));
    assert!(is_genum_directive("   //go:generate genum -type=Status   "));
    assert!(!is_genum_directive("// genum -type=Status"));
    assert!(!is_genum_directive("//go:generate stringer -type=Status"));
    assert!(!is_genum_directive("//go:generate somegenum tool"));
    assert!(!is_genum_directive("//go:generate genum"));
    assert!(!is_genum_directive(""));
}

#[test]
fn test_parse_flags() {
    let flags = parse_flags("//go:generate genum -type=Role -output=out.go -case=sensitive")
        .expect("flags should parse");
    assert_eq!(
        flags.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect::<Vec<_>>(),
        vec![("-type", "Role"), ("-output", "out.go"), ("-case", "sensitive")]
    );

    let flags = parse_flags("//go:generate genum -type=").expect("flags should parse");
    assert_eq!(flags["-type"], "");

    let flags = parse_flags("//go:generate genum -type=A -type=B").expect("flags should parse");
    assert_eq!(flags.len(), 1);
    assert_eq!(flags["-type"], "B");
}

#[test]
fn test_strip_quotes_removes_one_pair() {
    assert_eq!(strip_quotes(r#""Status""#), "Status");
    assert_eq!(strip_quotes(r#"""Status"""#), r#""Status""#);
    assert_eq!(strip_quotes("'Status'"), "Status");
    assert_eq!(strip_quotes("''"), "");
    assert_eq!(strip_quotes("plain"), "plain");
}

#[test]
fn test_strip_quotes_keeps_unbalanced_quotes() {
    assert_eq!(strip_quotes("'mixed\""), "'mixed\"");
    assert_eq!(strip_quotes("Status'"), "Status'");
    assert_eq!(strip_quotes("\"Status"), "\"Status");
    assert_eq!(strip_quotes("\""), "\"");
    assert_eq!(strip_quotes("'"), "'");
}

#[test]
fn test_parse_keeps_mismatched_quotes() {
    let directive = parse("//go:generate genum -type='Status\" -trimprefix=Status'", "types.go");
    assert_eq!(directive.type_name, "'Status\"");
    assert_eq!(directive.trim_prefix, "Status'");
    assert_eq!(directive.output, "types_genum.go");
}

#[test]
fn test_parse_is_deterministic() {
    let comments = [
        r#"//go:generate genum -type="Status" -output="status_gen.go" -trimprefix='Status_'"#,
        "//go:generate genum -type=Complex=Type -output=a=b.go",
        "//go:generate genum -type=First -type=Second -case=lower -case=upper",
        "//go:generate genum -type=Status",
        "//go:generate genum -type=Status -case=ignore",
        "//go:generate genum -type=Status -case=lower",
        "//go:generate genum -type=Status -case=upper",
    ];
    for comment in comments {
        let first = parse(comment, "types.go");
        let second = parse(comment, "types.go");
        assert_eq!(first, second, "{comment}");
        assert_eq!(first.type_name, second.type_name);
        assert_eq!(first.output, second.output);
        assert_eq!(first.trim_prefix, second.trim_prefix);
        assert_eq!(first.case, second.case);
    }

    let repeated = parse(comments[2], "types.go");
    assert_eq!(repeated.type_name, "Second");
    assert_eq!(repeated.case, CaseHandling::Upper);
    let multi = parse(comments[1], "types.go");
    assert_eq!(multi.type_name, "Complex=Type");
    assert_eq!(multi.output, "a=b.go");
}

#[test]
fn test_default_output() {
    assert_eq!(default_output("color.go"), "color_genum.go");
    assert_eq!(default_output("my.go.types.go"), "my.go.types_genum.go");
    assert_eq!(default_output("README"), "README_genum.go");
}

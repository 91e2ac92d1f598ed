//! Tests for constant.rs

use crate::constant::*;

#[test]
fn test_parse_int_literal_bases() {
    assert_eq!(parse_int_literal("42"), Some(42));
    assert_eq!(parse_int_literal("0"), Some(0));
    assert_eq!(parse_int_literal("0x1F"), Some(31));
    assert_eq!(parse_int_literal("0b101"), Some(5));
    assert_eq!(parse_int_literal("0o17"), Some(15));
    assert_eq!(parse_int_literal("0755"), Some(0o755));
    assert_eq!(parse_int_literal("1_000_000"), Some(1_000_000));
    assert_eq!(parse_int_literal("09"), None);
    assert_eq!(parse_int_literal("0x"), None);
}

#[test]
fn test_parse_float_literal() {
    assert_eq!(parse_float_literal("1.5"), Some(1.5));
    assert_eq!(parse_float_literal(".25"), Some(0.25));
    assert_eq!(parse_float_literal("1e3"), Some(1000.0));
    assert_eq!(parse_float_literal("0x1p-2"), Some(0.25));
    assert_eq!(parse_float_literal("0x1.8p1"), Some(3.0));
}

#[test]
fn test_parse_rune_literal() {
    assert_eq!(parse_rune_literal("'a'"), Some(97));
    assert_eq!(parse_rune_literal(r"'\n'"), Some(10));
    assert_eq!(parse_rune_literal(r"'\x41'"), Some(65));
    assert_eq!(parse_rune_literal(r"'\101'"), Some(65));
    assert_eq!(parse_rune_literal("'é'"), Some(0xe9));
    assert_eq!(parse_rune_literal("'ab'"), None);
}

#[test]
fn test_unquote_string() {
    assert_eq!(unquote_string(r#""plain""#).as_deref(), Some("plain"));
    assert_eq!(unquote_string(r#""a\"b\\c\td""#).as_deref(), Some("a\"b\\c\td"));
    assert_eq!(unquote_string(r#""é\x41""#).as_deref(), Some("éA"));
    assert_eq!(unquote_string("`raw \\n`").as_deref(), Some("raw \\n"));
    assert_eq!(unquote_string("`a\r\nb`").as_deref(), Some("a\nb"));
    assert_eq!(unquote_string(r#""bad \q""#), None);
    assert_eq!(unquote_string("unquoted"), None);
}

#[test]
fn test_quote_go_string() {
    assert_eq!(quote_go_string("active"), "\"active\"");
    assert_eq!(quote_go_string("say \"hi\""), r#""say \"hi\"""#);
    assert_eq!(quote_go_string("a\\b"), r#""a\\b""#);
    assert_eq!(quote_go_string("line\nnext\t"), r#""line\nnext\t""#);
    assert_eq!(quote_go_string("\x01"), r#""\x01""#);
    assert_eq!(quote_go_string("héllo"), "\"héllo\"");
}

#[test]
fn test_to_go_text() {
    assert_eq!(ConstValue::Int(-7).to_go_text(), "-7");
    assert_eq!(ConstValue::Float(2.0).to_go_text(), "2");
    assert_eq!(ConstValue::Float(0.5).to_go_text(), "0.5");
    assert_eq!(ConstValue::Bool(true).to_go_text(), "true");
    assert_eq!(ConstValue::String("x".to_string()).to_go_text(), "\"x\"");
}

#[test]
fn test_as_int() {
    assert_eq!(ConstValue::Float(3.0).as_int(), Some(3));
    assert_eq!(ConstValue::Float(3.5).as_int(), None);
    assert_eq!(ConstValue::String("3".to_string()).as_int(), None);
}

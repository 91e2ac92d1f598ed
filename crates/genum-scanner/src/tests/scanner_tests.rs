//! Tests for scanner.rs

use crate::scanner::*;
use crate::syntax_kind::SyntaxKind;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    let mut out = Vec::new();
    loop {
        let token = scanner.scan();
        if token.kind == SyntaxKind::EndOfFile {
            break;
        }
        out.push(token.kind);
    }
    out
}

fn texts(source: &str) -> Vec<String> {
    let mut scanner = ScannerState::new(source);
    let mut out = Vec::new();
    loop {
        let token = scanner.scan();
        if token.kind == SyntaxKind::EndOfFile {
            break;
        }
        out.push(scanner.token_text(&token).to_string());
    }
    out
}

#[test]
fn test_scan_const_spec() {
    assert_eq!(
        kinds("const A Color = iota"),
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Equals,
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
        ]
    );
}

#[test]
fn test_semicolon_inserted_after_identifier_at_newline() {
    let mut scanner = ScannerState::new("a\nb");
    let a = scanner.scan();
    let semi = scanner.scan();
    let b = scanner.scan();
    assert_eq!(a.kind, SyntaxKind::Identifier);
    assert_eq!(semi.kind, SyntaxKind::Semicolon);
    assert!(semi.implicit);
    assert_eq!(semi.line, 1);
    assert_eq!(b.kind, SyntaxKind::Identifier);
    assert_eq!(b.line, 2);
}

#[test]
fn test_no_semicolon_after_operator_at_newline() {
    assert_eq!(
        kinds("1 +\n2"),
        vec![
            SyntaxKind::IntLiteral,
            SyntaxKind::Plus,
            SyntaxKind::IntLiteral,
            SyntaxKind::Semicolon,
        ]
    );
}

#[test]
fn test_no_semicolon_after_open_paren() {
    assert_eq!(
        kinds("const (\n)"),
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::OpenParen,
            SyntaxKind::CloseParen,
            SyntaxKind::Semicolon,
        ]
    );
}

#[test]
fn test_multi_line_general_comment_acts_like_newline() {
    assert_eq!(
        kinds("a /* one\ntwo */ b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
            SyntaxKind::Identifier,
            SyntaxKind::Semicolon,
        ]
    );
}

#[test]
fn test_comments_are_collected_with_lines() {
    let mut scanner = ScannerState::new("// first\n/* second */\nx");
    while scanner.scan().kind != SyntaxKind::EndOfFile {}
    let comments = scanner.comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].get_text(scanner.source_text()), "// first");
    assert_eq!(comments[0].line, 1);
    assert!(!comments[0].is_multi_line);
    assert_eq!(comments[1].get_text(scanner.source_text()), "/* second */");
    assert_eq!(comments[1].line, 2);
    assert!(comments[1].is_multi_line);
}

#[test]
fn test_line_comment_excludes_carriage_return() {
    let mut scanner = ScannerState::new("//go:generate genum -type=A\r\nconst");
    while scanner.scan().kind != SyntaxKind::EndOfFile {}
    assert_eq!(
        scanner.comments()[0].get_text(scanner.source_text()),
        "//go:generate genum -type=A"
    );
}

#[test]
fn test_number_literals() {
    assert_eq!(
        kinds("42 0x1F 0b101 0o17 1_000 3.14 .5 1e9 0x1p-2 2i"),
        vec![
            SyntaxKind::IntLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::ImaginaryLiteral,
            SyntaxKind::Semicolon,
        ]
    );
}

#[test]
fn test_string_and_rune_literals() {
    assert_eq!(
        texts(r#""a\"b" `raw` 'x' '\n'"#),
        vec![r#""a\"b""#, "`raw`", "'x'", r"'\n'", ""]
    );
}

#[test]
fn test_raw_string_spanning_lines_advances_line() {
    let mut scanner = ScannerState::new("`a\nb`\nc");
    let raw = scanner.scan();
    assert_eq!(raw.kind, SyntaxKind::StringLiteral);
    let semi = scanner.scan();
    assert_eq!(semi.kind, SyntaxKind::Semicolon);
    let c = scanner.scan();
    assert_eq!(c.line, 3);
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new("\"abc\nx");
    while scanner.scan().kind != SyntaxKind::EndOfFile {}
    assert_eq!(scanner.diagnostics().len(), 1);
    assert_eq!(
        scanner.diagnostics()[0].message,
        "string literal not terminated"
    );
}

#[test]
fn test_operators_longest_match() {
    assert_eq!(
        texts("&^= &^ << <<= <- ... := != x"),
        vec!["&^=", "&^", "<<", "<<=", "<-", "...", ":=", "!=", "x", ""]
    );
}

#[test]
fn test_unicode_identifier() {
    assert_eq!(texts("Ünïcode_1"), vec!["Ünïcode_1", ""]);
}

#[test]
fn test_invalid_character() {
    let mut scanner = ScannerState::new("@");
    let token = scanner.scan();
    assert_eq!(token.kind, SyntaxKind::Unknown);
    assert_eq!(scanner.diagnostics()[0].message, "invalid character");
}

//! Scanner state machine.
//!
//! Produces one token per `scan()` call. Newlines are significant in Go: a
//! newline (or a general comment spanning lines, or end of file) after a
//! token that can end a statement yields an implicit `Semicolon` token.

use crate::comments::Comment;
use crate::syntax_kind::{SyntaxKind, text_to_keyword, token_ends_statement};
use std::sync::Arc;

/// A scanned token. Text is recovered from the source via `pos..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset, exclusive)
    pub end: u32,
    /// 1-based line of the first character
    pub line: u32,
    /// True for semicolons inserted at a newline or end of file
    pub implicit: bool,
}

/// A lexical error. Scanning always continues after reporting one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub pos: u32,
    pub line: u32,
    pub message: &'static str,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    line: u32,
    insert_semicolon: bool,
    comments: Vec<Comment>,
    diagnostics: Vec<ScanDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        ScannerState {
            text: text.into(),
            pos: 0,
            line: 1,
            insert_semicolon: false,
            comments: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Text of a token. Implicit semicolons have the text `"\n"` or `""`.
    pub fn token_text(&self, token: &Token) -> &str {
        self.text
            .get(token.pos as usize..token.end as usize)
            .unwrap_or("")
    }

    /// Comments seen so far, in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    pub fn diagnostics(&self) -> &[ScanDiagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn error(&mut self, pos: usize, message: &'static str) {
        self.diagnostics.push(ScanDiagnostic {
            pos: pos as u32,
            line: self.line,
            message,
        });
    }

    fn implicit_semicolon(&mut self, pos: usize, end: usize, line: u32) -> Token {
        self.insert_semicolon = false;
        Token {
            kind: SyntaxKind::Semicolon,
            pos: pos as u32,
            end: end as u32,
            line,
            implicit: true,
        }
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token.
    pub fn scan(&mut self) -> Token {
        loop {
            let Some(ch) = self.byte_at(self.pos) else {
                if self.insert_semicolon {
                    let end = self.text.len();
                    return self.implicit_semicolon(end, end, self.line);
                }
                let end = self.text.len() as u32;
                return Token {
                    kind: SyntaxKind::EndOfFile,
                    pos: end,
                    end,
                    line: self.line,
                    implicit: false,
                };
            };

            match ch {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    let pos = self.pos;
                    let line = self.line;
                    self.pos += 1;
                    self.line += 1;
                    if self.insert_semicolon {
                        return self.implicit_semicolon(pos, pos + 1, line);
                    }
                }
                b'/' if self.byte_at(self.pos + 1) == Some(b'/') => self.scan_line_comment(),
                b'/' if self.byte_at(self.pos + 1) == Some(b'*') => {
                    let start = self.pos;
                    let start_line = self.line;
                    self.scan_general_comment();
                    // A general comment spanning lines acts like a newline.
                    if self.insert_semicolon && self.line > start_line {
                        return self.implicit_semicolon(start, start, start_line);
                    }
                }
                _ => break,
            }
        }

        let start = self.pos;
        let line = self.line;
        let kind = self.scan_token();
        self.insert_semicolon = token_ends_statement(kind);
        Token {
            kind,
            pos: start as u32,
            end: self.pos as u32,
            line,
            implicit: false,
        }
    }

    fn scan_line_comment(&mut self) {
        let start = self.pos;
        let rest = &self.text.as_bytes()[start..];
        let len = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
        // Keep a trailing '\r' out of the comment text.
        let mut end = start + len;
        if end > start && self.byte_at(end - 1) == Some(b'\r') {
            end -= 1;
        }
        self.comments.push(Comment {
            pos: start as u32,
            end: end as u32,
            line: self.line,
            end_line: self.line,
            is_multi_line: false,
        });
        self.pos = start + len;
    }

    fn scan_general_comment(&mut self) {
        let start = self.pos;
        let start_line = self.line;
        let body = &self.text.as_bytes()[start + 2..];
        let end = match memchr::memmem::find(body, b"*/") {
            Some(offset) => start + 2 + offset + 2,
            None => {
                self.error(start, "comment not terminated");
                self.text.len()
            }
        };
        let newlines = memchr::memchr_iter(b'\n', &self.text.as_bytes()[start..end]).count();
        self.line += newlines as u32;
        self.pos = end;
        self.comments.push(Comment {
            pos: start as u32,
            end: end as u32,
            line: start_line,
            end_line: self.line,
            is_multi_line: true,
        });
    }

    fn scan_token(&mut self) -> SyntaxKind {
        let Some(ch) = self.char_at(self.pos) else {
            return SyntaxKind::EndOfFile;
        };

        if is_identifier_start(ch) {
            return self.scan_identifier();
        }
        if ch.is_ascii_digit()
            || (ch == '.' && self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()))
        {
            return self.scan_number();
        }

        match ch {
            '"' => self.scan_string(),
            '`' => self.scan_raw_string(),
            '\'' => self.scan_rune(),
            _ => self.scan_operator(ch),
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        text_to_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    fn skip_digits(&mut self, hex: bool) {
        while let Some(b) = self.byte_at(self.pos) {
            let ok = b == b'_' || if hex { b.is_ascii_hexdigit() } else { b.is_ascii_digit() };
            if !ok {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_exponent(&mut self) {
        self.pos += 1;
        if matches!(self.byte_at(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let digits_start = self.pos;
        self.skip_digits(false);
        if self.pos == digits_start {
            self.error(self.pos, "exponent has no digits");
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let mut kind = SyntaxKind::IntLiteral;
        let prefix = if self.byte_at(self.pos) == Some(b'0') {
            self.byte_at(self.pos + 1).map(|b| b.to_ascii_lowercase())
        } else {
            None
        };

        match prefix {
            Some(b'x') => {
                self.pos += 2;
                self.skip_digits(true);
                if self.byte_at(self.pos) == Some(b'.') {
                    kind = SyntaxKind::FloatLiteral;
                    self.pos += 1;
                    self.skip_digits(true);
                }
                if matches!(self.byte_at(self.pos), Some(b'p' | b'P')) {
                    kind = SyntaxKind::FloatLiteral;
                    self.skip_exponent();
                }
            }
            Some(b'b' | b'o') => {
                self.pos += 2;
                self.skip_digits(false);
            }
            _ => {
                self.skip_digits(false);
                if self.byte_at(self.pos) == Some(b'.') {
                    kind = SyntaxKind::FloatLiteral;
                    self.pos += 1;
                    self.skip_digits(false);
                }
                if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
                    kind = SyntaxKind::FloatLiteral;
                    self.skip_exponent();
                }
            }
        }

        if self.byte_at(self.pos) == Some(b'i') {
            self.pos += 1;
            kind = SyntaxKind::ImaginaryLiteral;
        }
        kind
    }

    /// Scan up to and including `quote`, honouring backslash escapes.
    fn scan_quoted(&mut self, quote: u8, message: &'static str) {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.byte_at(self.pos) {
                None | Some(b'\n') => {
                    self.error(start, message);
                    return;
                }
                Some(b'\\') => self.pos += 2,
                Some(b) if b == quote => {
                    self.pos += 1;
                    return;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_string(&mut self) -> SyntaxKind {
        self.scan_quoted(b'"', "string literal not terminated");
        self.pos = self.pos.min(self.text.len());
        SyntaxKind::StringLiteral
    }

    fn scan_rune(&mut self) -> SyntaxKind {
        self.scan_quoted(b'\'', "rune literal not terminated");
        self.pos = self.pos.min(self.text.len());
        SyntaxKind::RuneLiteral
    }

    fn scan_raw_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        let body = &self.text.as_bytes()[start + 1..];
        let end = match memchr::memchr(b'`', body) {
            Some(offset) => start + 1 + offset + 1,
            None => {
                self.error(start, "raw string literal not terminated");
                self.text.len()
            }
        };
        let newlines = memchr::memchr_iter(b'\n', &self.text.as_bytes()[start..end]).count();
        self.line += newlines as u32;
        self.pos = end;
        SyntaxKind::StringLiteral
    }

    fn scan_operator(&mut self, ch: char) -> SyntaxKind {
        let next = self.byte_at(self.pos + 1);
        let next2 = self.byte_at(self.pos + 2);
        let (kind, len) = match (ch, next, next2) {
            ('+', Some(b'+'), _) => (SyntaxKind::PlusPlus, 2),
            ('+', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('+', _, _) => (SyntaxKind::Plus, 1),
            ('-', Some(b'-'), _) => (SyntaxKind::MinusMinus, 2),
            ('-', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('-', _, _) => (SyntaxKind::Minus, 1),
            ('*', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('*', _, _) => (SyntaxKind::Star, 1),
            ('/', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('/', _, _) => (SyntaxKind::Slash, 1),
            ('%', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('%', _, _) => (SyntaxKind::Percent, 1),
            ('&', Some(b'&'), _) => (SyntaxKind::AmpAmp, 2),
            ('&', Some(b'^'), Some(b'=')) => (SyntaxKind::AssignOp, 3),
            ('&', Some(b'^'), _) => (SyntaxKind::AmpCaret, 2),
            ('&', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('&', _, _) => (SyntaxKind::Amp, 1),
            ('|', Some(b'|'), _) => (SyntaxKind::PipePipe, 2),
            ('|', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('|', _, _) => (SyntaxKind::Pipe, 1),
            ('^', Some(b'='), _) => (SyntaxKind::AssignOp, 2),
            ('^', _, _) => (SyntaxKind::Caret, 1),
            ('<', Some(b'<'), Some(b'=')) => (SyntaxKind::AssignOp, 3),
            ('<', Some(b'<'), _) => (SyntaxKind::LessLess, 2),
            ('<', Some(b'='), _) => (SyntaxKind::LessEquals, 2),
            ('<', Some(b'-'), _) => (SyntaxKind::Arrow, 2),
            ('<', _, _) => (SyntaxKind::Less, 1),
            ('>', Some(b'>'), Some(b'=')) => (SyntaxKind::AssignOp, 3),
            ('>', Some(b'>'), _) => (SyntaxKind::GreaterGreater, 2),
            ('>', Some(b'='), _) => (SyntaxKind::GreaterEquals, 2),
            ('>', _, _) => (SyntaxKind::Greater, 1),
            ('=', Some(b'='), _) => (SyntaxKind::EqualsEquals, 2),
            ('=', _, _) => (SyntaxKind::Equals, 1),
            ('!', Some(b'='), _) => (SyntaxKind::BangEquals, 2),
            ('!', _, _) => (SyntaxKind::Bang, 1),
            (':', Some(b'='), _) => (SyntaxKind::ColonEquals, 2),
            (':', _, _) => (SyntaxKind::Colon, 1),
            ('.', Some(b'.'), Some(b'.')) => (SyntaxKind::Ellipsis, 3),
            ('.', _, _) => (SyntaxKind::Dot, 1),
            ('~', _, _) => (SyntaxKind::Tilde, 1),
            ('(', _, _) => (SyntaxKind::OpenParen, 1),
            (')', _, _) => (SyntaxKind::CloseParen, 1),
            ('[', _, _) => (SyntaxKind::OpenBracket, 1),
            (']', _, _) => (SyntaxKind::CloseBracket, 1),
            ('{', _, _) => (SyntaxKind::OpenBrace, 1),
            ('}', _, _) => (SyntaxKind::CloseBrace, 1),
            (',', _, _) => (SyntaxKind::Comma, 1),
            (';', _, _) => (SyntaxKind::Semicolon, 1),
            _ => {
                self.error(self.pos, "invalid character");
                (SyntaxKind::Unknown, ch.len_utf8())
            }
        };
        self.pos += len;
        kind
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

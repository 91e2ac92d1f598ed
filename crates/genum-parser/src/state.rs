//! Parser state - declaration, type and constant expression parsing.

use crate::ast::*;
use genum_scanner::{
    Comment, ScannerState, SyntaxKind, Token, binary_precedence, punctuation_to_text,
    token_is_literal,
};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::trace;

/// A syntax error. Parsing recovers at the next declaration or spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub pos: u32,
    pub line: u32,
    pub message: String,
}

pub struct ParserState {
    file_name: String,
    text: Arc<str>,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    cursor: usize,
    diagnostics: Vec<ParseDiagnostic>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> Self {
        let mut scanner = ScannerState::new(source_text);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.scan();
            tokens.push(token);
            if token.kind == SyntaxKind::EndOfFile {
                break;
            }
        }

        let diagnostics = scanner
            .diagnostics()
            .iter()
            .map(|diag| ParseDiagnostic {
                pos: diag.pos,
                line: diag.line,
                message: diag.message.to_string(),
            })
            .collect();

        ParserState {
            file_name,
            text: scanner.source_text_arc(),
            comments: scanner.take_comments(),
            tokens,
            cursor: 0,
            diagnostics,
        }
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn token(&self) -> Token {
        self.peek(0)
    }

    fn peek(&self, offset: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.cursor + offset).min(last)]
    }

    fn kind(&self) -> SyntaxKind {
        self.token().kind
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.token();
        if token.kind != SyntaxKind::EndOfFile {
            self.cursor += 1;
        }
        token
    }

    fn text_of(&self, token: &Token) -> &str {
        self.text
            .get(token.pos as usize..token.end as usize)
            .unwrap_or("")
    }

    fn describe(&self, token: &Token) -> String {
        match token.kind {
            SyntaxKind::EndOfFile => "EOF".to_string(),
            SyntaxKind::Semicolon if token.implicit => "newline".to_string(),
            _ => format!("'{}'", self.text_of(token)),
        }
    }

    fn error_at(&mut self, token: Token, message: String) {
        trace!(file = %self.file_name, line = token.line, %message, "syntax error");
        self.diagnostics.push(ParseDiagnostic {
            pos: token.pos,
            line: token.line,
            message,
        });
    }

    fn expected(&mut self, what: &str) {
        let token = self.token();
        let found = self.describe(&token);
        self.error_at(token, format!("expected {what}, found {found}"));
    }

    fn expect(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.at(kind) {
            return Some(self.advance());
        }
        let what = punctuation_to_text(kind)
            .map(|text| format!("'{text}'"))
            .unwrap_or_else(|| format!("{kind:?}"));
        self.expected(&what);
        None
    }

    /// Accept a `;`, or nothing before a closing `)` or `}`.
    fn expect_semicolon(&mut self) -> Option<()> {
        match self.kind() {
            SyntaxKind::Semicolon => {
                self.advance();
                Some(())
            }
            SyntaxKind::CloseParen | SyntaxKind::CloseBrace | SyntaxKind::EndOfFile => Some(()),
            _ => {
                self.expected("';'");
                None
            }
        }
    }

    fn parse_ident(&mut self) -> Option<Ident> {
        if !self.at(SyntaxKind::Identifier) {
            self.expected("identifier");
            return None;
        }
        let token = self.advance();
        Some(Ident::new(
            self.text_of(&token),
            Span::new(token.pos, token.end),
        ))
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Skip tokens up to and including the `;` that ends the current
    /// top-level declaration.
    fn skip_declaration(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                SyntaxKind::EndOfFile => return,
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    depth = depth.saturating_sub(1)
                }
                SyntaxKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip the rest of a spec inside a group. Stops after a `;` or before the
    /// `)` closing the group.
    fn skip_spec(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                SyntaxKind::EndOfFile => return,
                SyntaxKind::CloseParen if depth == 0 => return,
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    depth = depth.saturating_sub(1)
                }
                SyntaxKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a balanced bracket group starting at the current opening token.
    fn skip_balanced(&mut self) -> Span {
        let start = self.token().pos;
        let mut depth = 0usize;
        loop {
            let token = self.advance();
            match token.kind {
                SyntaxKind::EndOfFile => return Span::new(start, token.end),
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Span::new(start, token.end);
                    }
                }
                _ => {}
            }
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// The comment group ending on the line right before the current token.
    fn leading_doc(&self) -> Option<CommentGroup> {
        let token = self.token();
        let (prev_end, prev_line) = if self.cursor == 0 {
            (0, 0)
        } else {
            let prev = self.tokens[self.cursor - 1];
            (prev.end, prev.line)
        };

        // Comments trailing the previous token's line are not doc comments.
        let candidates: Vec<&Comment> = self
            .comments
            .iter()
            .filter(|comment| {
                comment.pos >= prev_end && comment.end <= token.pos && comment.line > prev_line
            })
            .collect();
        let last = candidates.last()?;
        if last.end_line + 1 != token.line {
            return None;
        }

        let mut first = candidates.len() - 1;
        while first > 0 && candidates[first - 1].end_line + 1 >= candidates[first].line {
            first -= 1;
        }

        let list = candidates[first..]
            .iter()
            .map(|comment| DocComment {
                text: comment.get_text(&self.text).to_string(),
                line: comment.line,
            })
            .collect();
        Some(CommentGroup { list })
    }

    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole file.
    pub fn parse_source_file(&mut self) -> SourceFile {
        let package = self.parse_package_clause();
        let mut decls = Vec::new();

        while !self.at(SyntaxKind::EndOfFile) {
            match self.kind() {
                SyntaxKind::ImportKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::VarKeyword => decls.push(self.parse_gen_decl()),
                SyntaxKind::FuncKeyword => decls.push(self.parse_func_decl()),
                SyntaxKind::Semicolon => {
                    self.advance();
                }
                _ => {
                    let start = self.token().pos;
                    self.expected("declaration");
                    self.skip_declaration();
                    let end = self.peek(0).pos.max(start);
                    decls.push(Decl::Bad(Span::new(start, end)));
                }
            }
        }

        SourceFile {
            file_name: self.file_name.clone(),
            package,
            decls,
            comments: self.comments.clone(),
            text: Arc::clone(&self.text),
        }
    }

    fn parse_package_clause(&mut self) -> Ident {
        let fallback = Ident::new("", Span::default());
        if !self.at(SyntaxKind::PackageKeyword) {
            self.expected("'package'");
            self.skip_declaration();
            return fallback;
        }
        self.advance();
        let Some(name) = self.parse_ident() else {
            self.skip_declaration();
            return fallback;
        };
        if self.expect_semicolon().is_none() {
            self.skip_declaration();
        }
        name
    }

    // =========================================================================
    // Generic declarations
    // =========================================================================

    fn parse_gen_decl(&mut self) -> Decl {
        let doc = self.leading_doc();
        let keyword = self.advance();
        let kind = match keyword.kind {
            SyntaxKind::ImportKeyword => DeclKind::Import,
            SyntaxKind::ConstKeyword => DeclKind::Const,
            SyntaxKind::TypeKeyword => DeclKind::Type,
            _ => DeclKind::Var,
        };

        let mut specs = Vec::new();
        let grouped = self.at(SyntaxKind::OpenParen);

        if grouped {
            self.advance();
            while !self.at(SyntaxKind::CloseParen) && !self.at(SyntaxKind::EndOfFile) {
                match self.parse_spec(kind) {
                    Some(spec) => {
                        specs.push(spec);
                        if self.expect_semicolon().is_none() {
                            self.skip_spec();
                        }
                    }
                    None => self.skip_spec(),
                }
            }
            if self.expect(SyntaxKind::CloseParen).is_none() {
                self.skip_declaration();
            } else if self.expect_semicolon().is_none() {
                self.skip_declaration();
            }
        } else {
            match self.parse_spec(kind) {
                Some(spec) => {
                    specs.push(spec);
                    if self.expect_semicolon().is_none() {
                        self.skip_declaration();
                    }
                }
                None => self.skip_declaration(),
            }
        }

        let end = self.tokens[self.cursor.saturating_sub(1)].end;
        Decl::Gen(GenDecl {
            kind,
            doc,
            specs,
            grouped,
            span: Span::new(keyword.pos, end.max(keyword.end)),
        })
    }

    fn parse_spec(&mut self, kind: DeclKind) -> Option<Spec> {
        match kind {
            DeclKind::Import => self.parse_import_spec().map(Spec::Import),
            DeclKind::Const => self.parse_const_spec().map(Spec::Value),
            DeclKind::Var => self.parse_var_spec().map(Spec::Value),
            DeclKind::Type => self.parse_type_spec().map(Spec::Type),
        }
    }

    fn parse_import_spec(&mut self) -> Option<ImportSpec> {
        let start = self.token().pos;
        let name = match self.kind() {
            SyntaxKind::Identifier => self.parse_ident(),
            SyntaxKind::Dot => {
                let token = self.advance();
                Some(Ident::new(".", Span::new(token.pos, token.end)))
            }
            _ => None,
        };
        if !self.at(SyntaxKind::StringLiteral) {
            self.expected("import path");
            return None;
        }
        let token = self.advance();
        let raw = self.text_of(&token);
        let path = raw.trim_matches(|c| c == '"' || c == '`').to_string();
        Some(ImportSpec {
            name,
            path,
            span: Span::new(start, token.end),
        })
    }

    fn parse_ident_list(&mut self) -> Option<SmallVec<[Ident; 1]>> {
        let mut names = SmallVec::new();
        names.push(self.parse_ident()?);
        while self.at(SyntaxKind::Comma) {
            self.advance();
            names.push(self.parse_ident()?);
        }
        Some(names)
    }

    fn parse_const_spec(&mut self) -> Option<ValueSpec> {
        let start = self.token().pos;
        let names = self.parse_ident_list()?;

        let ty = match self.kind() {
            SyntaxKind::Equals
            | SyntaxKind::Semicolon
            | SyntaxKind::CloseParen
            | SyntaxKind::EndOfFile => None,
            _ => Some(self.parse_type()?),
        };

        let mut values = Vec::new();
        if self.at(SyntaxKind::Equals) {
            self.advance();
            values.push(self.parse_expr()?);
            while self.at(SyntaxKind::Comma) {
                self.advance();
                values.push(self.parse_expr()?);
            }
        }

        let end = self.tokens[self.cursor.saturating_sub(1)].end;
        Some(ValueSpec {
            names,
            ty,
            values,
            span: Span::new(start, end),
        })
    }

    /// Variable specs keep only their names; type and initialisers are skipped.
    fn parse_var_spec(&mut self) -> Option<ValueSpec> {
        let start = self.token().pos;
        let names = self.parse_ident_list()?;
        let mut depth = 0usize;
        loop {
            match self.kind() {
                SyntaxKind::EndOfFile => break,
                SyntaxKind::Semicolon | SyntaxKind::CloseParen if depth == 0 => break,
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.advance();
        }
        let end = self.tokens[self.cursor.saturating_sub(1)].end;
        Some(ValueSpec {
            names,
            ty: None,
            values: Vec::new(),
            span: Span::new(start, end),
        })
    }

    fn parse_type_spec(&mut self) -> Option<TypeSpec> {
        let start = self.token().pos;
        let name = self.parse_ident()?;

        let mut type_params = false;
        if self.at(SyntaxKind::OpenBracket) && self.looks_like_type_params() {
            self.skip_balanced();
            type_params = true;
        }

        let alias = self.at(SyntaxKind::Equals);
        if alias {
            self.advance();
        }
        let ty = self.parse_type()?;
        let end = self.tokens[self.cursor.saturating_sub(1)].end;
        Some(TypeSpec {
            name,
            type_params,
            alias,
            ty,
            span: Span::new(start, end),
        })
    }

    /// `type G[T any] ...` versus `type A [N]int`.
    fn looks_like_type_params(&self) -> bool {
        self.peek(1).kind == SyntaxKind::Identifier
            && !matches!(
                self.peek(2).kind,
                SyntaxKind::CloseBracket
                    | SyntaxKind::Plus
                    | SyntaxKind::Minus
                    | SyntaxKind::Slash
                    | SyntaxKind::Percent
                    | SyntaxKind::LessLess
                    | SyntaxKind::GreaterGreater
                    | SyntaxKind::Dot
            )
    }

    // =========================================================================
    // Function declarations
    // =========================================================================

    fn parse_func_decl(&mut self) -> Decl {
        let doc = self.leading_doc();
        let keyword = self.advance();

        let has_receiver = self.at(SyntaxKind::OpenParen);
        if has_receiver {
            self.skip_balanced();
        }

        let Some(name) = self.parse_ident() else {
            self.skip_declaration();
            return Decl::Bad(Span::new(keyword.pos, self.token().pos));
        };

        // Signature and body: everything up to the `;` closing the declaration.
        self.skip_declaration();
        let end = self.tokens[self.cursor.saturating_sub(1)].end;
        Decl::Func(FuncDecl {
            name,
            has_receiver,
            doc,
            span: Span::new(keyword.pos, end),
        })
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn can_start_type(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::Star
                | SyntaxKind::OpenBracket
                | SyntaxKind::OpenParen
                | SyntaxKind::MapKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::Arrow
                | SyntaxKind::FuncKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::InterfaceKeyword
        )
    }

    pub(crate) fn parse_type(&mut self) -> Option<TypeExpr> {
        match self.kind() {
            SyntaxKind::Identifier => {
                let first = self.parse_ident()?;
                let mut ty = if self.at(SyntaxKind::Dot)
                    && self.peek(1).kind == SyntaxKind::Identifier
                {
                    self.advance();
                    let name = self.parse_ident()?;
                    TypeExpr::Qualified {
                        package: first,
                        name,
                    }
                } else {
                    TypeExpr::Name(first)
                };
                if self.at(SyntaxKind::OpenBracket) && self.peek(1).kind != SyntaxKind::CloseBracket
                {
                    self.advance();
                    let mut args = vec![self.parse_type()?];
                    while self.at(SyntaxKind::Comma) {
                        self.advance();
                        if self.at(SyntaxKind::CloseBracket) {
                            break;
                        }
                        args.push(self.parse_type()?);
                    }
                    self.expect(SyntaxKind::CloseBracket)?;
                    ty = TypeExpr::Instantiated {
                        base: Box::new(ty),
                        args,
                    };
                }
                Some(ty)
            }
            SyntaxKind::Star => {
                self.advance();
                Some(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            SyntaxKind::OpenBracket => {
                self.advance();
                match self.kind() {
                    SyntaxKind::CloseBracket => {
                        self.advance();
                        Some(TypeExpr::Slice(Box::new(self.parse_type()?)))
                    }
                    SyntaxKind::Ellipsis => {
                        self.advance();
                        self.expect(SyntaxKind::CloseBracket)?;
                        Some(TypeExpr::Array {
                            len: None,
                            elem: Box::new(self.parse_type()?),
                        })
                    }
                    _ => {
                        let len = self.parse_expr()?;
                        self.expect(SyntaxKind::CloseBracket)?;
                        Some(TypeExpr::Array {
                            len: Some(Box::new(len)),
                            elem: Box::new(self.parse_type()?),
                        })
                    }
                }
            }
            SyntaxKind::MapKeyword => {
                self.advance();
                self.expect(SyntaxKind::OpenBracket)?;
                let key = self.parse_type()?;
                self.expect(SyntaxKind::CloseBracket)?;
                let value = self.parse_type()?;
                Some(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            SyntaxKind::ChanKeyword => {
                self.advance();
                let dir = if self.at(SyntaxKind::Arrow) {
                    self.advance();
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Some(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            SyntaxKind::Arrow => {
                self.advance();
                self.expect(SyntaxKind::ChanKeyword)?;
                Some(TypeExpr::Chan {
                    dir: ChanDir::Receive,
                    elem: Box::new(self.parse_type()?),
                })
            }
            SyntaxKind::FuncKeyword => {
                self.advance();
                if !self.at(SyntaxKind::OpenParen) {
                    self.expected("'('");
                    return None;
                }
                self.skip_balanced();
                if self.at(SyntaxKind::OpenParen) {
                    self.skip_balanced();
                } else if Self::can_start_type(self.kind()) {
                    self.parse_type()?;
                }
                Some(TypeExpr::Func)
            }
            SyntaxKind::StructKeyword => {
                self.advance();
                if !self.at(SyntaxKind::OpenBrace) {
                    self.expected("'{'");
                    return None;
                }
                let empty = self.peek(1).kind == SyntaxKind::CloseBrace;
                self.skip_balanced();
                Some(TypeExpr::Struct { empty })
            }
            SyntaxKind::InterfaceKeyword => {
                self.advance();
                if !self.at(SyntaxKind::OpenBrace) {
                    self.expected("'{'");
                    return None;
                }
                self.skip_balanced();
                Some(TypeExpr::Interface)
            }
            SyntaxKind::OpenParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(SyntaxKind::CloseParen)?;
                Some(TypeExpr::Paren(Box::new(inner)))
            }
            _ => {
                self.expected("type");
                None
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_binary_expr(1)
    }

    fn parse_binary_expr(&mut self, min_precedence: u8) -> Option<Expr> {
        let mut left = self.parse_unary_expr()?;
        loop {
            let precedence = binary_precedence(self.kind());
            if precedence == 0 || precedence < min_precedence {
                return Some(left);
            }
            let op = binary_op(self.advance().kind)?;
            let right = self.parse_binary_expr(precedence + 1)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_unary_expr(&mut self) -> Option<Expr> {
        let op = match self.kind() {
            SyntaxKind::Plus => UnaryOp::Plus,
            SyntaxKind::Minus => UnaryOp::Minus,
            SyntaxKind::Bang => UnaryOp::Not,
            SyntaxKind::Caret => UnaryOp::Complement,
            SyntaxKind::Star => UnaryOp::Deref,
            SyntaxKind::Amp => UnaryOp::Address,
            SyntaxKind::Tilde => UnaryOp::Tilde,
            SyntaxKind::Arrow if self.peek(1).kind != SyntaxKind::ChanKeyword => UnaryOp::Receive,
            _ => return self.parse_primary_expr(),
        };
        self.advance();
        let operand = self.parse_unary_expr()?;
        Some(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_operand(&mut self) -> Option<Expr> {
        let token = self.token();
        match token.kind {
            SyntaxKind::Identifier => self.parse_ident().map(Expr::Ident),
            kind if token_is_literal(kind) => {
                self.advance();
                let lit_kind = match kind {
                    SyntaxKind::IntLiteral => LitKind::Int,
                    SyntaxKind::FloatLiteral => LitKind::Float,
                    SyntaxKind::ImaginaryLiteral => LitKind::Imaginary,
                    SyntaxKind::RuneLiteral => LitKind::Rune,
                    _ => LitKind::String,
                };
                Some(Expr::BasicLit(BasicLit {
                    kind: lit_kind,
                    value: self.text_of(&token).to_string(),
                    span: Span::new(token.pos, token.end),
                }))
            }
            SyntaxKind::OpenParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(SyntaxKind::CloseParen)?;
                Some(Expr::Paren(Box::new(inner)))
            }
            SyntaxKind::FuncKeyword => {
                self.parse_type()?;
                if self.at(SyntaxKind::OpenBrace) {
                    let body = self.skip_balanced();
                    return Some(Expr::Bad(Span::new(token.pos, body.end)));
                }
                Some(Expr::Type(TypeExpr::Func))
            }
            SyntaxKind::OpenBracket
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword => self.parse_type().map(Expr::Type),
            SyntaxKind::Arrow => self.parse_type().map(Expr::Type),
            _ => {
                self.expected("operand");
                None
            }
        }
    }

    fn parse_primary_expr(&mut self) -> Option<Expr> {
        let mut expr = self.parse_operand()?;
        loop {
            match self.kind() {
                SyntaxKind::Dot => {
                    self.advance();
                    if self.at(SyntaxKind::OpenParen) {
                        let start = self.token().pos;
                        let span = self.skip_balanced();
                        expr = Expr::Bad(Span::new(start, span.end));
                        continue;
                    }
                    let sel = self.parse_ident()?;
                    expr = Expr::Selector {
                        base: Box::new(expr),
                        sel,
                    };
                }
                SyntaxKind::OpenBracket => {
                    let start = self.token().pos;
                    if self.bracket_contains_colon() {
                        let span = self.skip_balanced();
                        expr = Expr::Bad(Span::new(start, span.end));
                        continue;
                    }
                    self.advance();
                    let mut indices = vec![self.parse_index_arg()?];
                    while self.at(SyntaxKind::Comma) {
                        self.advance();
                        if self.at(SyntaxKind::CloseBracket) {
                            break;
                        }
                        indices.push(self.parse_index_arg()?);
                    }
                    self.expect(SyntaxKind::CloseBracket)?;
                    expr = Expr::Index {
                        base: Box::new(expr),
                        indices,
                    };
                }
                SyntaxKind::OpenParen => {
                    self.advance();
                    let mut args = Vec::new();
                    let mut ellipsis = false;
                    while !self.at(SyntaxKind::CloseParen) && !self.at(SyntaxKind::EndOfFile) {
                        args.push(self.parse_index_arg()?);
                        if self.at(SyntaxKind::Ellipsis) {
                            self.advance();
                            ellipsis = true;
                        }
                        if !self.at(SyntaxKind::Comma) {
                            break;
                        }
                        self.advance();
                    }
                    self.expect(SyntaxKind::CloseParen)?;
                    expr = Expr::Call {
                        fun: Box::new(expr),
                        args,
                        ellipsis,
                    };
                }
                _ => return Some(expr),
            }
        }
    }

    /// Call arguments and index expressions may be types (`make([]int, 3)`).
    fn parse_index_arg(&mut self) -> Option<Expr> {
        match self.kind() {
            SyntaxKind::OpenBracket
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword => {
                let ty = self.parse_type()?;
                // A conversion like `[]byte(s)` continues as a primary expression.
                if self.at(SyntaxKind::OpenParen) {
                    self.advance();
                    let arg = self.parse_expr()?;
                    self.expect(SyntaxKind::CloseParen)?;
                    return Some(Expr::Call {
                        fun: Box::new(Expr::Type(ty)),
                        args: vec![arg],
                        ellipsis: false,
                    });
                }
                Some(Expr::Type(ty))
            }
            _ => self.parse_expr(),
        }
    }

    /// Whether the bracket group at the cursor is a slice expression `a[i:j]`.
    fn bracket_contains_colon(&self) -> bool {
        let mut depth = 0usize;
        let mut offset = 0;
        loop {
            let token = self.peek(offset);
            match token.kind {
                SyntaxKind::EndOfFile => return false,
                SyntaxKind::OpenParen | SyntaxKind::OpenBracket | SyntaxKind::OpenBrace => {
                    depth += 1
                }
                SyntaxKind::CloseParen | SyntaxKind::CloseBracket | SyntaxKind::CloseBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return false;
                    }
                }
                SyntaxKind::Colon if depth == 1 => return true,
                _ => {}
            }
            offset += 1;
        }
    }
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    let op = match kind {
        SyntaxKind::Plus => BinaryOp::Add,
        SyntaxKind::Minus => BinaryOp::Sub,
        SyntaxKind::Star => BinaryOp::Mul,
        SyntaxKind::Slash => BinaryOp::Quo,
        SyntaxKind::Percent => BinaryOp::Rem,
        SyntaxKind::Amp => BinaryOp::And,
        SyntaxKind::Pipe => BinaryOp::Or,
        SyntaxKind::Caret => BinaryOp::Xor,
        SyntaxKind::LessLess => BinaryOp::Shl,
        SyntaxKind::GreaterGreater => BinaryOp::Shr,
        SyntaxKind::AmpCaret => BinaryOp::AndNot,
        SyntaxKind::AmpAmp => BinaryOp::LogicalAnd,
        SyntaxKind::PipePipe => BinaryOp::LogicalOr,
        SyntaxKind::EqualsEquals => BinaryOp::Eql,
        SyntaxKind::BangEquals => BinaryOp::Neq,
        SyntaxKind::Less => BinaryOp::Lss,
        SyntaxKind::LessEquals => BinaryOp::Leq,
        SyntaxKind::Greater => BinaryOp::Gtr,
        SyntaxKind::GreaterEquals => BinaryOp::Geq,
        _ => return None,
    };
    Some(op)
}

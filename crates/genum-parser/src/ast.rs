//! Syntax tree of a Go source file, restricted to top-level declarations.

use genum_scanner::Comment;
use smallvec::SmallVec;
use std::sync::Arc;

/// Byte range in the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub pos: u32,
    pub end: u32,
}

impl Span {
    pub fn new(pos: u32, end: u32) -> Span {
        Span { pos, end }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Ident {
        Ident {
            name: name.into(),
            span,
        }
    }

    /// Exported names start with an upper-case letter.
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// Whether a Go identifier is exported from its package.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

// =============================================================================
// Comments
// =============================================================================

/// A single comment line of a doc comment group, markers included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocComment {
    pub text: String,
    pub line: u32,
}

/// Comments directly preceding a declaration with no blank line between.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<DocComment>,
}

impl CommentGroup {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|comment| comment.text.as_str())
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imaginary,
    Rune,
    String,
}

/// A literal with its source text (quotes and prefixes included).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    Complement,
    Deref,
    Address,
    Receive,
    Tilde,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    LogicalAnd,
    LogicalOr,
    Eql,
    Neq,
    Lss,
    Leq,
    Gtr,
    Geq,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eql
                | BinaryOp::Neq
                | BinaryOp::Lss
                | BinaryOp::Leq
                | BinaryOp::Gtr
                | BinaryOp::Geq
        )
    }

    pub fn is_shift(self) -> bool {
        matches!(self, BinaryOp::Shl | BinaryOp::Shr)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    Paren(Box<Expr>),
    Selector {
        base: Box<Expr>,
        sel: Ident,
    },
    Index {
        base: Box<Expr>,
        indices: Vec<Expr>,
    },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A type literal in expression position, e.g. the `[]byte` of `[]byte(s)`.
    Type(TypeExpr),
    /// Function and composite literals, type assertions, slice expressions.
    Bad(Span),
}

impl Expr {
    /// Strip any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(inner) = expr {
            expr = inner;
        }
        expr
    }
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Receive,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    Name(Ident),
    Qualified {
        package: Ident,
        name: Ident,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array {
        /// `None` for `[...]T`
        len: Option<Box<Expr>>,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func,
    Struct {
        /// Whether the struct declares no fields (`struct{}`)
        empty: bool,
    },
    Interface,
    Instantiated {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    Paren(Box<TypeExpr>),
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ImportSpec {
    pub name: Option<Ident>,
    /// Import path without quotes
    pub path: String,
    pub span: Span,
}

/// One line of a `const` or `var` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueSpec {
    pub names: SmallVec<[Ident; 1]>,
    pub ty: Option<TypeExpr>,
    /// Initialisers. Always empty for `var` specs, whose initialisers are skipped.
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: bool,
    /// `type A = B`
    pub alias: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Import,
    Const,
    Type,
    Var,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenDecl {
    pub kind: DeclKind,
    pub doc: Option<CommentGroup>,
    pub specs: Vec<Spec>,
    /// Declared with a parenthesised group
    pub grouped: bool,
    pub span: Span,
}

/// A constant name with the type and initialiser that apply to it.
#[derive(Clone, Copy, Debug)]
pub struct ConstEntry<'a> {
    pub name: &'a Ident,
    /// Declared type, repeated from the previous spec when the spec is implicit.
    pub ty: Option<&'a TypeExpr>,
    /// Initialiser, repeated from the previous spec when the spec is implicit.
    pub value: Option<&'a Expr>,
    /// Initialiser written on this spec itself.
    pub declared_value: Option<&'a Expr>,
    /// Index of the spec within its group (the value of `iota`).
    pub iota: u32,
}

impl GenDecl {
    /// Constant entries with Go's implicit repetition applied: a spec without
    /// type and initialisers repeats those of the last spec that had them.
    pub fn const_entries(&self) -> Vec<ConstEntry<'_>> {
        let mut entries = Vec::new();
        if self.kind != DeclKind::Const {
            return entries;
        }

        let mut last: Option<&ValueSpec> = None;
        for (index, spec) in self.specs.iter().enumerate() {
            let Spec::Value(spec) = spec else {
                continue;
            };
            let implicit = spec.values.is_empty() && spec.ty.is_none();
            if !implicit {
                last = Some(spec);
            }
            let source = if implicit { last } else { Some(spec) };

            for (position, name) in spec.names.iter().enumerate() {
                entries.push(ConstEntry {
                    name,
                    ty: source.and_then(|s| s.ty.as_ref()),
                    value: source.and_then(|s| s.values.get(position)),
                    declared_value: spec.values.get(position),
                    iota: index as u32,
                });
            }
        }
        entries
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Methods are not part of the package scope
    pub has_receiver: bool,
    pub doc: Option<CommentGroup>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
    Bad(Span),
}

/// A parsed Go source file.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub file_name: String,
    pub package: Ident,
    pub decls: Vec<Decl>,
    pub comments: Vec<Comment>,
    pub text: Arc<str>,
}

impl SourceFile {
    pub fn gen_decls(&self) -> impl Iterator<Item = &GenDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Gen(decl) => Some(decl),
            _ => None,
        })
    }

    /// Comments appearing before the `package` clause.
    pub fn header_comments(&self) -> impl Iterator<Item = &str> {
        let package_pos = self.package.span.pos;
        self.comments
            .iter()
            .take_while(move |comment| comment.end <= package_pos)
            .map(|comment| comment.get_text(&self.text))
    }
}

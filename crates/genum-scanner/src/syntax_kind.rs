//! Token kinds of the Go language.

use serde::Serialize;

/// Kind of a scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFile,

    // =========================================================================
    // Names and literals
    // =========================================================================
    Identifier,
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    StringLiteral,

    // =========================================================================
    // Operators
    // =========================================================================
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    LessLess,
    GreaterGreater,
    AmpCaret,
    /// Any compound assignment (`+=`, `<<=`, `&^=`, ...).
    AssignOp,
    AmpAmp,
    PipePipe,
    Arrow,
    PlusPlus,
    MinusMinus,
    EqualsEquals,
    Less,
    Greater,
    Equals,
    Bang,
    Tilde,
    BangEquals,
    LessEquals,
    GreaterEquals,
    ColonEquals,
    Ellipsis,

    // =========================================================================
    // Punctuation
    // =========================================================================
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Comma,
    Dot,
    Semicolon,
    Colon,

    // =========================================================================
    // Keywords
    // =========================================================================
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,
}

/// Map identifier text to its keyword kind.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "chan" => SyntaxKind::ChanKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "defer" => SyntaxKind::DeferKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "fallthrough" => SyntaxKind::FallthroughKeyword,
        "for" => SyntaxKind::ForKeyword,
        "func" => SyntaxKind::FuncKeyword,
        "go" => SyntaxKind::GoKeyword,
        "goto" => SyntaxKind::GotoKeyword,
        "if" => SyntaxKind::IfKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "map" => SyntaxKind::MapKeyword,
        "package" => SyntaxKind::PackageKeyword,
        "range" => SyntaxKind::RangeKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "select" => SyntaxKind::SelectKeyword,
        "struct" => SyntaxKind::StructKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "type" => SyntaxKind::TypeKeyword,
        "var" => SyntaxKind::VarKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Check if a token kind is a keyword.
pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::BreakKeyword as u16)
        && (kind as u16) <= (SyntaxKind::VarKeyword as u16)
}

/// Check if a token kind is a basic literal.
pub fn token_is_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::ImaginaryLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral
    )
}

/// Whether a newline after this token terminates the statement.
///
/// Mirrors the Go rule: identifiers, literals, `break`, `continue`,
/// `fallthrough`, `return`, `++`, `--`, `)`, `]` and `}`.
pub fn token_ends_statement(kind: SyntaxKind) -> bool {
    token_is_literal(kind)
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::BreakKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::FallthroughKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::PlusPlus
                | SyntaxKind::MinusMinus
                | SyntaxKind::CloseParen
                | SyntaxKind::CloseBracket
                | SyntaxKind::CloseBrace
        )
}

/// Binary operator precedence (5 binds tightest), 0 for non-operators.
pub fn binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::PipePipe => 1,
        SyntaxKind::AmpAmp => 2,
        SyntaxKind::EqualsEquals
        | SyntaxKind::BangEquals
        | SyntaxKind::Less
        | SyntaxKind::LessEquals
        | SyntaxKind::Greater
        | SyntaxKind::GreaterEquals => 3,
        SyntaxKind::Plus | SyntaxKind::Minus | SyntaxKind::Pipe | SyntaxKind::Caret => 4,
        SyntaxKind::Star
        | SyntaxKind::Slash
        | SyntaxKind::Percent
        | SyntaxKind::LessLess
        | SyntaxKind::GreaterGreater
        | SyntaxKind::Amp
        | SyntaxKind::AmpCaret => 5,
        _ => 0,
    }
}

/// Fixed text of an operator or punctuation token.
pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    let text = match kind {
        SyntaxKind::Plus => "+",
        SyntaxKind::Minus => "-",
        SyntaxKind::Star => "*",
        SyntaxKind::Slash => "/",
        SyntaxKind::Percent => "%",
        SyntaxKind::Amp => "&",
        SyntaxKind::Pipe => "|",
        SyntaxKind::Caret => "^",
        SyntaxKind::LessLess => "<<",
        SyntaxKind::GreaterGreater => ">>",
        SyntaxKind::AmpCaret => "&^",
        SyntaxKind::AmpAmp => "&&",
        SyntaxKind::PipePipe => "||",
        SyntaxKind::Arrow => "<-",
        SyntaxKind::PlusPlus => "++",
        SyntaxKind::MinusMinus => "--",
        SyntaxKind::EqualsEquals => "==",
        SyntaxKind::Less => "<",
        SyntaxKind::Greater => ">",
        SyntaxKind::Equals => "=",
        SyntaxKind::Bang => "!",
        SyntaxKind::Tilde => "~",
        SyntaxKind::BangEquals => "!=",
        SyntaxKind::LessEquals => "<=",
        SyntaxKind::GreaterEquals => ">=",
        SyntaxKind::ColonEquals => ":=",
        SyntaxKind::Ellipsis => "...",
        SyntaxKind::OpenParen => "(",
        SyntaxKind::CloseParen => ")",
        SyntaxKind::OpenBracket => "[",
        SyntaxKind::CloseBracket => "]",
        SyntaxKind::OpenBrace => "{",
        SyntaxKind::CloseBrace => "}",
        SyntaxKind::Comma => ",",
        SyntaxKind::Dot => ".",
        SyntaxKind::Semicolon => ";",
        SyntaxKind::Colon => ":",
        _ => return None,
    };
    Some(text)
}

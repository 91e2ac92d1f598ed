//! Constant values, literal decoding and Go quoting.
//!
//! Integers are exact within `i128`, floats use `f64`. Operations that leave
//! this range fail instead of wrapping.

use genum_parser::{BasicLit, LitKind};
use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    String(String),
    Int(i128),
    Float(f64),
}

impl ConstValue {
    /// Go source text of the value. Strings are quoted.
    pub fn to_go_text(&self) -> String {
        match self {
            ConstValue::Bool(value) => value.to_string(),
            ConstValue::String(value) => quote_go_string(value),
            ConstValue::Int(value) => value.to_string(),
            ConstValue::Float(value) => format_float(*value),
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            ConstValue::Int(value) => Some(*value),
            ConstValue::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                let truncated = *value as i128;
                (truncated as f64 == *value).then_some(truncated)
            }
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConstValue::Int(value) => Some(*value as f64),
            ConstValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ConstValue::Int(_) | ConstValue::Float(_))
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{}", value as i128);
    }
    format!("{value}")
}

// =============================================================================
// Literals
// =============================================================================

/// Decode a literal token into its constant value. Imaginary literals have
/// no representation and yield `None`.
pub fn literal_value(lit: &BasicLit) -> Option<ConstValue> {
    match lit.kind {
        LitKind::Int => parse_int_literal(&lit.value).map(ConstValue::Int),
        LitKind::Float => parse_float_literal(&lit.value).map(ConstValue::Float),
        LitKind::Rune => parse_rune_literal(&lit.value).map(ConstValue::Int),
        LitKind::String => unquote_string(&lit.value).map(ConstValue::String),
        LitKind::Imaginary => None,
    }
}

pub fn parse_int_literal(text: &str) -> Option<i128> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    let (radix, body) = match digits.get(..2) {
        Some("0x") | Some("0X") => (16, &digits[2..]),
        Some("0b") | Some("0B") => (2, &digits[2..]),
        Some("0o") | Some("0O") => (8, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };
    if body.is_empty() {
        return None;
    }
    i128::from_str_radix(body, radix).ok()
}

pub fn parse_float_literal(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        return parse_hex_float(hex);
    }
    digits.parse::<f64>().ok()
}

/// `1.8p3`: hexadecimal mantissa, binary exponent.
fn parse_hex_float(text: &str) -> Option<f64> {
    let (mantissa, exponent) = match text.find(['p', 'P']) {
        Some(index) => (&text[..index], text[index + 1..].parse::<i32>().ok()?),
        None => (text, 0),
    };

    let mut value = 0f64;
    let mut scale = 0i32;
    let mut seen_dot = false;
    for c in mantissa.chars() {
        if c == '.' {
            seen_dot = true;
            continue;
        }
        value = value * 16.0 + f64::from(c.to_digit(16)?);
        if seen_dot {
            scale -= 4;
        }
    }
    Some(value * 2f64.powi(exponent + scale))
}

pub fn parse_rune_literal(text: &str) -> Option<i128> {
    let body = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = body.chars().peekable();
    let value = match chars.next()? {
        '\\' => match parse_escape(&mut chars, '\'')? {
            Unescaped::Byte(byte) => u32::from(byte),
            Unescaped::Char(c) => u32::from(c),
        },
        c => u32::from(c),
    };
    if chars.next().is_some() {
        return None;
    }
    Some(i128::from(value))
}

/// Decode an interpreted (`"..."`) or raw (`` `...` ``) string literal.
pub fn unquote_string(text: &str) -> Option<String> {
    if let Some(raw) = text.strip_prefix('`') {
        let body = raw.strip_suffix('`')?;
        return Some(body.chars().filter(|&c| c != '\r').collect());
    }

    let body = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut bytes = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match parse_escape(&mut chars, '"')? {
                Unescaped::Byte(byte) => bytes.push(byte),
                Unescaped::Char(c) => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            },
            '\n' => return None,
            c => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

enum Unescaped {
    Byte(u8),
    Char(char),
}

/// Parse the escape sequence following a backslash.
fn parse_escape(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<Unescaped> {
    let c = chars.next()?;
    let simple = match c {
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0c'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        '\\' => Some('\\'),
        c if c == quote => Some(c),
        _ => None,
    };
    if let Some(simple) = simple {
        return Some(Unescaped::Char(simple));
    }

    match c {
        '0'..='7' => {
            let mut value = c.to_digit(8)?;
            for _ in 0..2 {
                value = value * 8 + chars.next()?.to_digit(8)?;
            }
            u8::try_from(value).ok().map(Unescaped::Byte)
        }
        'x' => hex_digits(chars, 2).and_then(|v| u8::try_from(v).ok().map(Unescaped::Byte)),
        'u' => hex_digits(chars, 4).and_then(char::from_u32).map(Unescaped::Char),
        'U' => hex_digits(chars, 8).and_then(char::from_u32).map(Unescaped::Char),
        _ => None,
    }
}

fn hex_digits(chars: &mut Peekable<Chars<'_>>, count: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value.checked_mul(16)? + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

/// Quote a string the way Go's `strconv.Quote` does.
pub fn quote_go_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\x7f' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() || c == '\u{feff}' => {
                if (c as u32) <= 0xffff {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                } else {
                    let _ = write!(out, "\\U{:08x}", c as u32);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

//! Generation model: what the renderer turns into Go source.

use serde::{Serialize, Serializer};
use std::fmt;

/// How the generated `Parse` function compares its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseHandling {
    #[default]
    Sensitive,
    Ignore,
    Lower,
    Upper,
}

impl CaseHandling {
    pub fn from_flag(value: &str) -> Option<CaseHandling> {
        match value {
            "sensitive" => Some(CaseHandling::Sensitive),
            "ignore" => Some(CaseHandling::Ignore),
            "lower" => Some(CaseHandling::Lower),
            "upper" => Some(CaseHandling::Upper),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaseHandling::Sensitive => "sensitive",
            CaseHandling::Ignore => "ignore",
            CaseHandling::Lower => "lower",
            CaseHandling::Upper => "upper",
        }
    }

    /// Whether generated code compares through the `strings` package.
    pub fn folds_case(self) -> bool {
        self != CaseHandling::Sensitive
    }
}

impl fmt::Display for CaseHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying representation of an enum type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BaseType {
    /// A predeclared type such as `string`, `int` or `byte`
    Basic(String),
    Pointer(Box<BaseType>),
    /// Any struct type, rendered `struct{}`
    EmptyStruct,
    Unsupported,
}

impl BaseType {
    pub fn is_string(&self) -> bool {
        matches!(self, BaseType::Basic(name) if name == "string")
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, BaseType::Basic(_))
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Basic(name) => f.write_str(name),
            BaseType::Pointer(elem) => write!(f, "*{elem}"),
            BaseType::EmptyStruct => f.write_str("struct{}"),
            BaseType::Unsupported => f.write_str("unsupported"),
        }
    }
}

impl Serialize for BaseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One exported constant of an enum type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
    /// Literal text of the value, without enclosing quotes
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub type_name: String,
    pub base_type: BaseType,
    pub trim_prefix: String,
    pub case: CaseHandling,
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Name shown by `String()`: the constant name without the trim prefix,
    /// or the full name when nothing would remain.
    pub fn display_name<'a>(&self, value: &'a EnumValue) -> &'a str {
        match value.name.strip_prefix(self.trim_prefix.as_str()) {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => &value.name,
        }
    }

    /// Whether the generated code for this enum needs the `strings` package.
    pub fn needs_strings(&self) -> bool {
        self.case.folds_case() && self.base_type.is_string()
    }
}

/// Everything written to one output file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationUnit {
    pub package: String,
    pub source: String,
    pub output: String,
    pub needs_strings: bool,
    pub enums: Vec<Enum>,
}

//! Enum extraction: resolve the directive's type and collect its constants.
//!
//! Two tiers:
//!
//! - **Precise**: with type information, a constant belongs to the enum when
//!   its resolved type is the enum type itself (same `TypeId`). Distinct
//!   named types and aliases never match each other.
//! - **Syntax**: without type information for a constant, its declared type
//!   name (implicit repetition applied) or the target of a `T(x)` initialiser
//!   is compared by name.
//!
//! Values come from the first `ValueStrategy` in `VALUE_STRATEGIES` that
//! produces one.

use crate::directive::Directive;
use crate::error::ExtractError;
use crate::loader::Package;
use crate::model::{BaseType, Enum, EnumValue};
use genum_checker::{BasicKind, ConstInfo, TypeClass, TypeId, quote_go_string, unquote_string};
use genum_parser::{ConstEntry, DeclKind, Expr, LitKind, SourceFile, Spec, TypeExpr, TypeSpec};
use tracing::{Level, debug, span, trace};

/// Named types nested deeper than this classify as unsupported.
const MAX_TYPE_DEPTH: usize = 64;

/// Build the enum a directive asks for.
pub fn extract_enum(package: &Package, directive: &Directive) -> Result<Enum, ExtractError> {
    let _span = span!(Level::DEBUG, "extract_enum", type_name = %directive.type_name).entered();
    let type_name = directive.type_name.as_str();

    let target = resolve_target(package, type_name)
        .ok_or_else(|| ExtractError::TypeNotFound(type_name.to_string()))?;
    debug!(base_type = %target.base_type, "resolved enum type");

    let mut values = Vec::new();
    for (file_index, file) in package.files.iter().enumerate() {
        for decl in file.gen_decls().filter(|decl| decl.kind == DeclKind::Const) {
            for entry in decl.const_entries() {
                let info = package
                    .info
                    .as_ref()
                    .and_then(|info| info.const_at(file_index, entry.name.span.pos));
                let source = ValueSource { entry, info };
                if !target.matches(&source, type_name) {
                    continue;
                }
                if !entry.name.is_exported() {
                    trace!(name = %entry.name.name, "skipping unexported constant");
                    continue;
                }
                let value = resolve_value(&source, VALUE_STRATEGIES);
                debug!(name = %entry.name.name, %value, "enum value");
                values.push(EnumValue {
                    name: entry.name.name.clone(),
                    value,
                });
            }
        }
    }

    if values.is_empty() {
        return Err(ExtractError::NoValues(type_name.to_string()));
    }

    Ok(Enum {
        type_name: directive.type_name.clone(),
        base_type: target.base_type,
        trim_prefix: directive.trim_prefix.clone(),
        case: directive.case,
        values,
    })
}

// =============================================================================
// Type resolution
// =============================================================================

struct Target {
    /// `None` without type information
    id: Option<TypeId>,
    base_type: BaseType,
}

impl Target {
    fn matches(&self, source: &ValueSource<'_>, type_name: &str) -> bool {
        if let Some(ty) = source.info.and_then(|info| info.ty) {
            return Some(ty) == self.id;
        }
        declared_type_name(&source.entry) == Some(type_name)
    }
}

fn resolve_target(package: &Package, type_name: &str) -> Option<Target> {
    match &package.info {
        Some(info) => {
            let (id, object) = info.lookup(type_name)?;
            if !object.is_type_name() {
                return None;
            }
            let ty = info.type_of(id)?;
            Some(Target {
                id: Some(ty),
                base_type: base_type_of_class(info.classify(ty)),
            })
        }
        None => {
            let spec = find_type_spec(&package.files, type_name)?;
            Some(Target {
                id: None,
                base_type: classify_spec(&package.files, spec, 0),
            })
        }
    }
}

pub fn base_type_of_class(class: TypeClass) -> BaseType {
    match class {
        TypeClass::Basic(kind) => BaseType::Basic(kind.name().to_string()),
        TypeClass::Pointer(elem) => BaseType::Pointer(Box::new(base_type_of_class(*elem))),
        TypeClass::Struct => BaseType::EmptyStruct,
        TypeClass::Other => BaseType::Unsupported,
    }
}

fn find_type_spec<'a>(files: &'a [SourceFile], name: &str) -> Option<&'a TypeSpec> {
    files
        .iter()
        .flat_map(|file| file.gen_decls())
        .filter(|decl| decl.kind == DeclKind::Type)
        .flat_map(|decl| decl.specs.iter())
        .find_map(|spec| match spec {
            Spec::Type(spec) if spec.name.name == name => Some(spec),
            _ => None,
        })
}

fn classify_spec(files: &[SourceFile], spec: &TypeSpec, depth: usize) -> BaseType {
    if spec.type_params {
        return BaseType::Unsupported;
    }
    classify_type_expr(files, &spec.ty, depth)
}

/// Classification from declarations alone, for packages loaded without
/// type information.
fn classify_type_expr(files: &[SourceFile], ty: &TypeExpr, depth: usize) -> BaseType {
    if depth > MAX_TYPE_DEPTH {
        return BaseType::Unsupported;
    }
    match ty {
        TypeExpr::Name(ident) => match find_type_spec(files, &ident.name) {
            Some(spec) => classify_spec(files, spec, depth + 1),
            None => match BasicKind::from_name(&ident.name) {
                Some(kind) => BaseType::Basic(kind.name().to_string()),
                None => BaseType::Unsupported,
            },
        },
        TypeExpr::Pointer(elem) => {
            BaseType::Pointer(Box::new(classify_type_expr(files, elem, depth + 1)))
        }
        TypeExpr::Struct { .. } => BaseType::EmptyStruct,
        TypeExpr::Paren(inner) => classify_type_expr(files, inner, depth + 1),
        _ => BaseType::Unsupported,
    }
}

/// Type name a constant is declared with: the explicit type, or the target of
/// a `T(x)` conversion initialiser.
fn declared_type_name<'a>(entry: &ConstEntry<'a>) -> Option<&'a str> {
    match entry.ty {
        Some(TypeExpr::Name(ident)) => Some(&ident.name),
        Some(_) => None,
        None => match entry.value.map(Expr::unparen) {
            Some(Expr::Call { fun, args, .. }) if args.len() == 1 => match fun.unparen() {
                Expr::Ident(ident) => Some(&ident.name),
                _ => None,
            },
            _ => None,
        },
    }
}

// =============================================================================
// Values
// =============================================================================

/// What a strategy sees of one constant.
#[derive(Clone, Copy, Debug)]
pub struct ValueSource<'a> {
    pub entry: ConstEntry<'a>,
    pub info: Option<&'a ConstInfo>,
}

/// One way of turning a constant into the literal text used by generated code.
pub trait ValueStrategy {
    fn name(&self) -> &'static str;

    fn value(&self, source: &ValueSource<'_>) -> Option<String>;
}

/// The value computed by the checker.
pub struct ResolvedValue;

/// The constant's own initialiser, read from the syntax.
pub struct SyntaxValue;

/// The constant's name. Always succeeds.
pub struct DeclaredName;

pub const VALUE_STRATEGIES: &[&dyn ValueStrategy] = &[&ResolvedValue, &SyntaxValue, &DeclaredName];

impl ValueStrategy for ResolvedValue {
    fn name(&self) -> &'static str {
        "resolved"
    }

    fn value(&self, source: &ValueSource<'_>) -> Option<String> {
        let value = source.info?.value.as_ref()?;
        Some(strip_string_quotes(&value.to_go_text()).to_string())
    }
}

impl ValueStrategy for SyntaxValue {
    fn name(&self) -> &'static str {
        "syntax"
    }

    fn value(&self, source: &ValueSource<'_>) -> Option<String> {
        syntax_value(source.entry.declared_value?)
    }
}

impl ValueStrategy for DeclaredName {
    fn name(&self) -> &'static str {
        "name"
    }

    fn value(&self, source: &ValueSource<'_>) -> Option<String> {
        Some(source.entry.name.name.clone())
    }
}

/// Run `strategies` in order; the first value wins. Falls back to the
/// constant's name.
pub fn resolve_value(source: &ValueSource<'_>, strategies: &[&dyn ValueStrategy]) -> String {
    for strategy in strategies {
        if let Some(value) = strategy.value(source) {
            trace!(strategy = strategy.name(), %value, "value resolved");
            return value;
        }
    }
    source.entry.name.name.clone()
}

fn syntax_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::BasicLit(lit) if lit.kind == LitKind::String => {
            let quoted = unquote_string(&lit.value)
                .map(|value| quote_go_string(&value))
                .unwrap_or_else(|| lit.value.clone());
            Some(strip_string_quotes(&quoted).to_string())
        }
        Expr::BasicLit(lit) => Some(lit.value.clone()),
        Expr::Ident(ident) => Some(ident.name.clone()),
        Expr::Selector { base, sel } => match base.unparen() {
            Expr::Ident(package) => Some(format!("{}.{}", package.name, sel.name)),
            _ => None,
        },
        Expr::Call { args, .. } => args.first().and_then(syntax_value),
        Expr::Paren(inner) => syntax_value(inner),
        _ => None,
    }
}

fn strip_string_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

#[cfg(test)]
#[path = "tests/extractor_tests.rs"]
mod extractor_tests;

//! Checker state - package scope construction, type resolution and constant
//! evaluation.
//!
//! Resolution is lazy and memoized per object. A slot that is re-entered
//! while still being computed is a cycle and resolves to an error.

use crate::constant::{ConstValue, literal_value};
use crate::info::{CheckDiagnostic, ConstInfo, TypeInfo};
use crate::intern::TypeInterner;
use crate::scope::{FileScope, Object, ObjectId, ObjectKind, Scope, default_import_name, is_builtin_func};
use crate::types::{BasicKind, TypeId, TypeKey};
use genum_parser::{
    BinaryOp, ConstEntry, Decl, DeclKind, Expr, LitKind, SourceFile, Spec, TypeExpr, TypeSpec,
    UnaryOp,
};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use tracing::{debug, trace};

const MAX_ALIAS_CHAIN: usize = 64;

/// A constant operand: its type (possibly untyped) and value.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Operand {
    pub ty: TypeId,
    pub value: ConstValue,
}

#[derive(Clone, Debug)]
enum Slot<T> {
    Active,
    Done(T),
}

#[derive(Clone, Debug)]
struct ConstResult {
    ty: Option<TypeId>,
    operand: Option<Operand>,
}

#[derive(Clone, Copy)]
struct EvalCtx {
    file: usize,
    pos: u32,
    iota: Option<i128>,
}

pub struct CheckerState<'a> {
    files: &'a [SourceFile],
    interner: TypeInterner,
    objects: Vec<Object>,
    scope: Scope,
    file_scopes: Vec<FileScope>,
    const_entries: FxHashMap<ObjectId, ConstEntry<'a>>,
    type_specs: FxHashMap<ObjectId, &'a TypeSpec>,
    const_slots: FxHashMap<ObjectId, Slot<ConstResult>>,
    underlying_slots: FxHashMap<ObjectId, Slot<TypeId>>,
    alias_slots: FxHashMap<ObjectId, Slot<TypeId>>,
    diagnostics: Vec<CheckDiagnostic>,
    /// Suppresses diagnostics while resolving generic declarations, whose
    /// type parameters are not modelled.
    quiet: u32,
}

impl<'a> CheckerState<'a> {
    pub fn new(files: &'a [SourceFile]) -> Self {
        CheckerState {
            files,
            interner: TypeInterner::new(),
            objects: Vec::new(),
            scope: Scope::default(),
            file_scopes: Vec::with_capacity(files.len()),
            const_entries: FxHashMap::default(),
            type_specs: FxHashMap::default(),
            const_slots: FxHashMap::default(),
            underlying_slots: FxHashMap::default(),
            alias_slots: FxHashMap::default(),
            diagnostics: Vec::new(),
            quiet: 0,
        }
    }

    /// Check every file and produce the package's type information.
    pub fn check(mut self) -> TypeInfo {
        self.collect_objects();
        debug!(
            files = self.files.len(),
            objects = self.objects.len(),
            "package scope collected"
        );

        for index in 0..self.objects.len() {
            let id = ObjectId(index as u32);
            let kind = self.objects[index].kind.clone();
            match kind {
                ObjectKind::TypeName { alias: false } => {
                    self.named_underlying(id);
                }
                ObjectKind::TypeName { alias: true } => {
                    self.alias_target(id);
                }
                ObjectKind::Const => {
                    self.const_result(id);
                }
                ObjectKind::Var | ObjectKind::Func => {}
            }
        }

        let mut object_types = Vec::with_capacity(self.objects.len());
        let mut consts = FxHashMap::default();
        for index in 0..self.objects.len() {
            let id = ObjectId(index as u32);
            let kind = self.objects[index].kind.clone();
            let ty = match kind {
                ObjectKind::TypeName { .. } => Some(self.declared_type(id)),
                ObjectKind::Const => {
                    let result = match self.const_slots.get(&id) {
                        Some(Slot::Done(result)) => result.clone(),
                        _ => ConstResult {
                            ty: None,
                            operand: None,
                        },
                    };
                    let object = &self.objects[index];
                    consts.insert(
                        (object.file, object.pos),
                        ConstInfo {
                            object: id,
                            ty: result.ty,
                            value: result.operand.map(|operand| operand.value),
                        },
                    );
                    result.ty
                }
                ObjectKind::Var | ObjectKind::Func => None,
            };
            object_types.push(ty);
        }

        TypeInfo {
            underlying: done_slots(self.underlying_slots),
            alias_targets: done_slots(self.alias_slots),
            interner: self.interner,
            objects: self.objects,
            scope: self.scope,
            object_types,
            consts,
            diagnostics: self.diagnostics,
        }
    }

    fn error(&mut self, file: usize, pos: u32, message: String) {
        if self.quiet > 0 {
            return;
        }
        trace!(file, pos, %message, "check error");
        self.diagnostics.push(CheckDiagnostic { file, pos, message });
    }

    // =========================================================================
    // Package scope
    // =========================================================================

    fn collect_objects(&mut self) {
        let files = self.files;
        for (file_index, file) in files.iter().enumerate() {
            let mut file_scope = FileScope::default();

            for (decl_index, decl) in file.decls.iter().enumerate() {
                match decl {
                    Decl::Gen(decl) => match decl.kind {
                        DeclKind::Import => {
                            for spec in &decl.specs {
                                let Spec::Import(spec) = spec else {
                                    continue;
                                };
                                let name = match &spec.name {
                                    Some(name) if name.name == "_" || name.name == "." => {
                                        continue;
                                    }
                                    Some(name) => name.name.clone(),
                                    None => default_import_name(&spec.path).to_string(),
                                };
                                file_scope.imports.insert(name, spec.path.clone());
                            }
                        }
                        DeclKind::Type => {
                            for (spec_index, spec) in decl.specs.iter().enumerate() {
                                let Spec::Type(spec) = spec else {
                                    continue;
                                };
                                let id = self.declare(Object {
                                    name: spec.name.name.clone(),
                                    kind: ObjectKind::TypeName { alias: spec.alias },
                                    file: file_index,
                                    pos: spec.name.span.pos,
                                    decl: decl_index,
                                    index: spec_index,
                                });
                                self.type_specs.insert(id, spec);
                            }
                        }
                        DeclKind::Const => {
                            for (entry_index, entry) in decl.const_entries().into_iter().enumerate()
                            {
                                let id = self.declare(Object {
                                    name: entry.name.name.clone(),
                                    kind: ObjectKind::Const,
                                    file: file_index,
                                    pos: entry.name.span.pos,
                                    decl: decl_index,
                                    index: entry_index,
                                });
                                self.const_entries.insert(id, entry);
                            }
                        }
                        DeclKind::Var => {
                            for (spec_index, spec) in decl.specs.iter().enumerate() {
                                let Spec::Value(spec) = spec else {
                                    continue;
                                };
                                for name in &spec.names {
                                    self.declare(Object {
                                        name: name.name.clone(),
                                        kind: ObjectKind::Var,
                                        file: file_index,
                                        pos: name.span.pos,
                                        decl: decl_index,
                                        index: spec_index,
                                    });
                                }
                            }
                        }
                    },
                    Decl::Func(func) if !func.has_receiver && func.name.name != "init" => {
                        self.declare(Object {
                            name: func.name.name.clone(),
                            kind: ObjectKind::Func,
                            file: file_index,
                            pos: func.name.span.pos,
                            decl: decl_index,
                            index: 0,
                        });
                    }
                    Decl::Func(_) | Decl::Bad(_) => {}
                }
            }

            self.file_scopes.push(file_scope);
        }
    }

    /// Create an object and bind its name in the package scope. Blank and
    /// redeclared names get an object but no binding.
    fn declare(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        let (name, file, pos) = (object.name.clone(), object.file, object.pos);
        self.objects.push(object);
        if name != "_" && self.scope.insert(&name, id).is_err() {
            self.error(file, pos, format!("{name} redeclared in this block"));
        }
        id
    }

    fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0 as usize]
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// The type denoted by a type name: a fresh defined type or an alias.
    fn declared_type(&mut self, id: ObjectId) -> TypeId {
        if self.object(id).is_alias() {
            self.interner.intern(TypeKey::Alias(id))
        } else {
            self.interner.intern(TypeKey::Named(id))
        }
    }

    fn resolve_type(&mut self, file: usize, ty: &TypeExpr) -> TypeId {
        match ty {
            TypeExpr::Name(ident) => {
                if let Some(id) = self.scope.lookup(&ident.name) {
                    if self.object(id).is_type_name() {
                        return self.declared_type(id);
                    }
                    self.error(file, ident.span.pos, format!("{} is not a type", ident.name));
                    return TypeId::INVALID;
                }
                if let Some(kind) = BasicKind::from_name(&ident.name) {
                    return self.interner.basic(kind);
                }
                match ident.name.as_str() {
                    "any" | "error" | "comparable" => self.interner.intern(TypeKey::Interface),
                    _ => {
                        self.error(file, ident.span.pos, format!("undefined: {}", ident.name));
                        TypeId::INVALID
                    }
                }
            }
            TypeExpr::Qualified { package, name } => {
                let path = self.file_scopes[file]
                    .package_path(&package.name)
                    .map(str::to_string);
                match path {
                    Some(path) => self.interner.intern(TypeKey::Imported {
                        path,
                        name: name.name.clone(),
                    }),
                    None => {
                        self.error(file, package.span.pos, format!("undefined: {}", package.name));
                        TypeId::INVALID
                    }
                }
            }
            TypeExpr::Pointer(elem) => {
                let elem = self.resolve_type(file, elem);
                self.interner.intern(TypeKey::Pointer(elem))
            }
            TypeExpr::Slice(elem) => {
                let elem = self.resolve_type(file, elem);
                self.interner.intern(TypeKey::Slice(elem))
            }
            TypeExpr::Array { len, elem } => {
                let len = len.as_ref().and_then(|len| {
                    let ctx = EvalCtx {
                        file,
                        pos: 0,
                        iota: None,
                    };
                    self.eval(ctx, len)
                        .and_then(|operand| operand.value.as_int())
                        .and_then(|len| u64::try_from(len).ok())
                });
                let elem = self.resolve_type(file, elem);
                self.interner.intern(TypeKey::Array { elem, len })
            }
            TypeExpr::Map { key, value } => {
                let key = self.resolve_type(file, key);
                let value = self.resolve_type(file, value);
                self.interner.intern(TypeKey::Map { key, value })
            }
            TypeExpr::Chan { elem, .. } => {
                let elem = self.resolve_type(file, elem);
                self.interner.intern(TypeKey::Chan(elem))
            }
            TypeExpr::Func => self.interner.intern(TypeKey::Func),
            TypeExpr::Struct { empty } => self.interner.intern(TypeKey::Struct { empty: *empty }),
            TypeExpr::Interface => self.interner.intern(TypeKey::Interface),
            // Instantiation is not modelled; the generic type stands in.
            TypeExpr::Instantiated { base, .. } => self.resolve_type(file, base),
            TypeExpr::Paren(inner) => self.resolve_type(file, inner),
        }
    }

    /// Resolve the right-hand side of a type declaration.
    fn resolve_spec_type(&mut self, id: ObjectId) -> TypeId {
        let Some(spec) = self.type_specs.get(&id).copied() else {
            return TypeId::INVALID;
        };
        let file = self.object(id).file;
        if spec.type_params {
            self.quiet += 1;
        }
        let ty = self.resolve_type(file, &spec.ty);
        if spec.type_params {
            self.quiet -= 1;
        }
        ty
    }

    fn alias_target(&mut self, id: ObjectId) -> TypeId {
        match self.alias_slots.get(&id) {
            Some(Slot::Done(ty)) => return *ty,
            Some(Slot::Active) => return TypeId::INVALID,
            None => {}
        }
        self.alias_slots.insert(id, Slot::Active);
        let ty = self.resolve_spec_type(id);
        self.alias_slots.insert(id, Slot::Done(ty));
        ty
    }

    fn named_underlying(&mut self, id: ObjectId) -> TypeId {
        match self.underlying_slots.get(&id) {
            Some(Slot::Done(ty)) => return *ty,
            Some(Slot::Active) => {
                let object = self.object(id);
                let (file, pos, name) = (object.file, object.pos, object.name.clone());
                self.error(file, pos, format!("invalid recursive type {name}"));
                return TypeId::INVALID;
            }
            None => {}
        }
        self.underlying_slots.insert(id, Slot::Active);
        let rhs = self.resolve_spec_type(id);
        let ty = self.underlying(rhs);
        self.underlying_slots.insert(id, Slot::Done(ty));
        ty
    }

    fn unalias(&mut self, ty: TypeId) -> TypeId {
        let mut current = ty;
        for _ in 0..MAX_ALIAS_CHAIN {
            match self.interner.lookup(current) {
                Some(TypeKey::Alias(object)) => {
                    let object = *object;
                    current = self.alias_target(object);
                }
                _ => return current,
            }
        }
        TypeId::INVALID
    }

    fn underlying(&mut self, ty: TypeId) -> TypeId {
        let ty = self.unalias(ty);
        match self.interner.lookup(ty) {
            Some(TypeKey::Named(object)) => {
                let object = *object;
                self.named_underlying(object)
            }
            _ => ty,
        }
    }

    fn basic_kind_of(&mut self, ty: TypeId) -> Option<BasicKind> {
        let underlying = self.underlying(ty);
        self.interner.as_basic(underlying)
    }

    fn is_untyped(&self, ty: TypeId) -> bool {
        self.interner
            .as_basic(ty)
            .is_some_and(BasicKind::is_untyped)
    }

    fn type_name(&self, ty: TypeId) -> String {
        match self.interner.lookup(ty) {
            Some(TypeKey::Basic(kind)) => kind.name().to_string(),
            Some(TypeKey::Named(object)) | Some(TypeKey::Alias(object)) => {
                self.object(*object).name.clone()
            }
            Some(TypeKey::Imported { path, name }) => format!("{path}.{name}"),
            _ => "invalid type".to_string(),
        }
    }

    // =========================================================================
    // Constants
    // =========================================================================

    fn const_result(&mut self, id: ObjectId) -> ConstResult {
        match self.const_slots.get(&id) {
            Some(Slot::Done(result)) => return result.clone(),
            Some(Slot::Active) => {
                let object = self.object(id);
                let (file, pos, name) = (object.file, object.pos, object.name.clone());
                self.error(file, pos, format!("initialization cycle for {name}"));
                return ConstResult {
                    ty: None,
                    operand: None,
                };
            }
            None => {}
        }
        self.const_slots.insert(id, Slot::Active);

        let object = self.object(id);
        let (file, pos) = (object.file, object.pos);
        let result = match self.const_entries.get(&id).copied() {
            Some(entry) => self.eval_const_entry(file, pos, entry),
            None => ConstResult {
                ty: None,
                operand: None,
            },
        };

        trace!(
            name = %self.object(id).name,
            ty = ?result.ty.map(|ty| self.type_name(ty)),
            value = ?result.operand.as_ref().map(|operand| &operand.value),
            "constant evaluated"
        );
        self.const_slots.insert(id, Slot::Done(result.clone()));
        result
    }

    fn eval_const_entry(&mut self, file: usize, pos: u32, entry: ConstEntry<'a>) -> ConstResult {
        let ctx = EvalCtx {
            file,
            pos,
            iota: Some(i128::from(entry.iota)),
        };
        let declared = entry.ty.map(|ty| self.resolve_type(file, ty));

        let operand = match entry.value {
            Some(expr) => self.eval(ctx, expr),
            None => {
                self.error(file, pos, format!("missing init expr for {}", entry.name.name));
                None
            }
        };

        match declared {
            Some(target) => ConstResult {
                ty: (!target.is_invalid()).then_some(target),
                operand: operand.and_then(|operand| self.assign(ctx, operand, target)),
            },
            None => ConstResult {
                ty: operand.as_ref().map(|operand| operand.ty),
                operand,
            },
        }
    }

    fn untyped(&self, kind: BasicKind, value: ConstValue) -> Operand {
        Operand {
            ty: self.interner.basic(kind),
            value,
        }
    }

    fn eval(&mut self, ctx: EvalCtx, expr: &Expr) -> Option<Operand> {
        match expr {
            Expr::BasicLit(lit) => {
                let kind = match lit.kind {
                    LitKind::Int => BasicKind::UntypedInt,
                    LitKind::Float => BasicKind::UntypedFloat,
                    LitKind::Rune => BasicKind::UntypedRune,
                    LitKind::String => BasicKind::UntypedString,
                    LitKind::Imaginary => return None,
                };
                match literal_value(lit) {
                    Some(value) => Some(self.untyped(kind, value)),
                    None => {
                        self.error(ctx.file, lit.span.pos, format!("invalid literal {}", lit.value));
                        None
                    }
                }
            }
            Expr::Ident(ident) => self.eval_ident(ctx, &ident.name, ident.span.pos),
            Expr::Paren(inner) => self.eval(ctx, inner),
            Expr::Unary { op, operand } => {
                let operand = self.eval(ctx, operand)?;
                self.unary(ctx, *op, operand)
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(ctx, left)?;
                let right = self.eval(ctx, right)?;
                self.binary(ctx, *op, left, right)
            }
            Expr::Call {
                fun,
                args,
                ellipsis,
            } => self.eval_call(ctx, fun, args, *ellipsis),
            // Imported constants and everything non-constant.
            Expr::Selector { .. } | Expr::Index { .. } | Expr::Type(_) | Expr::Bad(_) => None,
        }
    }

    fn eval_ident(&mut self, ctx: EvalCtx, name: &str, pos: u32) -> Option<Operand> {
        if name == "_" {
            return None;
        }
        if let Some(id) = self.scope.lookup(name) {
            return match self.object(id).kind {
                ObjectKind::Const => self.const_result(id).operand,
                _ => None,
            };
        }
        match name {
            "true" => Some(self.untyped(BasicKind::UntypedBool, ConstValue::Bool(true))),
            "false" => Some(self.untyped(BasicKind::UntypedBool, ConstValue::Bool(false))),
            "iota" => match ctx.iota {
                Some(iota) => Some(self.untyped(BasicKind::UntypedInt, ConstValue::Int(iota))),
                None => {
                    self.error(ctx.file, pos, "cannot use iota outside constant declaration".to_string());
                    None
                }
            },
            "nil" => None,
            _ => {
                self.error(ctx.file, pos, format!("undefined: {name}"));
                None
            }
        }
    }

    fn eval_call(
        &mut self,
        ctx: EvalCtx,
        fun: &Expr,
        args: &[Expr],
        ellipsis: bool,
    ) -> Option<Operand> {
        let fun = fun.unparen();

        if let Some(target) = self.conversion_target(ctx.file, fun) {
            if args.len() != 1 || ellipsis {
                self.error(ctx.file, ctx.pos, "conversion takes exactly one argument".to_string());
                return None;
            }
            let operand = self.eval(ctx, &args[0])?;
            return self.convert(ctx, operand, target);
        }

        let is_len = matches!(fun, Expr::Ident(ident) if ident.name == "len")
            && self.scope.lookup("len").is_none();
        if !is_len || args.len() != 1 {
            return None;
        }
        let operand = self.eval(ctx, &args[0])?;
        match operand.value {
            ConstValue::String(value) => Some(Operand {
                ty: self.interner.basic(BasicKind::Int),
                value: ConstValue::Int(value.len() as i128),
            }),
            _ => None,
        }
    }

    /// The type named by the function part of a call, if the call is a
    /// conversion.
    fn conversion_target(&mut self, file: usize, fun: &Expr) -> Option<TypeId> {
        match fun {
            Expr::Ident(ident) => match self.scope.lookup(&ident.name) {
                Some(id) if self.object(id).is_type_name() => Some(self.declared_type(id)),
                Some(_) => None,
                None if is_builtin_func(&ident.name) => None,
                None => BasicKind::from_name(&ident.name).map(|kind| self.interner.basic(kind)),
            },
            Expr::Type(ty) => Some(self.resolve_type(file, ty)),
            _ => None,
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Implicit conversion for a typed constant declaration.
    fn assign(&mut self, ctx: EvalCtx, operand: Operand, target: TypeId) -> Option<Operand> {
        if target.is_invalid() {
            return None;
        }
        if self.is_untyped(operand.ty) {
            return self.represent(ctx, operand.value, target);
        }
        if self.unalias(operand.ty) == self.unalias(target) {
            return Some(Operand {
                ty: target,
                value: operand.value,
            });
        }
        let message = format!(
            "cannot use {} value as {} value",
            self.type_name(operand.ty),
            self.type_name(target)
        );
        self.error(ctx.file, ctx.pos, message);
        None
    }

    fn represent(&mut self, ctx: EvalCtx, value: ConstValue, target: TypeId) -> Option<Operand> {
        let Some(kind) = self.basic_kind_of(target) else {
            let message = format!("invalid constant type {}", self.type_name(target));
            self.error(ctx.file, ctx.pos, message);
            return None;
        };
        let rendered = value.to_go_text();
        match represent_value(value, kind) {
            Some(value) => Some(Operand { ty: target, value }),
            None => {
                let message = format!(
                    "cannot use {rendered} as {} value (overflows or truncated)",
                    self.type_name(target)
                );
                self.error(ctx.file, ctx.pos, message);
                None
            }
        }
    }

    /// Explicit conversion `T(x)`.
    fn convert(&mut self, ctx: EvalCtx, operand: Operand, target: TypeId) -> Option<Operand> {
        let target_kind = self.basic_kind_of(target)?;
        let from_kind = self.basic_kind_of(operand.ty)?;

        if target_kind.is_string() && from_kind.is_integer() {
            let c = operand
                .value
                .as_int()
                .and_then(|code| u32::try_from(code).ok())
                .and_then(char::from_u32)
                .unwrap_or('\u{fffd}');
            return Some(Operand {
                ty: target,
                value: ConstValue::String(c.to_string()),
            });
        }

        let compatible = (target_kind.is_numeric() && from_kind.is_numeric())
            || (target_kind.is_string() && from_kind.is_string())
            || (target_kind.is_boolean() && from_kind.is_boolean());
        if !compatible {
            let message = format!(
                "cannot convert {} to type {}",
                self.type_name(operand.ty),
                self.type_name(target)
            );
            self.error(ctx.file, ctx.pos, message);
            return None;
        }
        self.represent(ctx, operand.value, target)
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn unary(&mut self, ctx: EvalCtx, op: UnaryOp, x: Operand) -> Option<Operand> {
        let kind = self.basic_kind_of(x.ty)?;
        let value = match (op, &x.value) {
            (UnaryOp::Plus, value) if value.is_numeric() => value.clone(),
            (UnaryOp::Minus, ConstValue::Int(v)) => ConstValue::Int(v.checked_neg()?),
            (UnaryOp::Minus, ConstValue::Float(v)) => ConstValue::Float(-v),
            (UnaryOp::Complement, ConstValue::Int(v)) if kind.is_integer() => {
                match kind.bit_size() {
                    Some(bits) if kind.is_unsigned() => ConstValue::Int(v ^ ((1i128 << bits) - 1)),
                    _ => ConstValue::Int(!v),
                }
            }
            (UnaryOp::Not, ConstValue::Bool(v)) => ConstValue::Bool(!v),
            _ => {
                let message = format!("invalid operation: operator {op:?} not defined on {}", self.type_name(x.ty));
                self.error(ctx.file, ctx.pos, message);
                return None;
            }
        };
        self.represent(ctx, value, x.ty)
    }

    /// The common type of two operands of a binary operation.
    fn unify(&mut self, ctx: EvalCtx, x: &Operand, y: &Operand) -> Option<TypeId> {
        match (self.is_untyped(x.ty), self.is_untyped(y.ty)) {
            (true, true) => {
                let xk = self.interner.as_basic(x.ty)?;
                let yk = self.interner.as_basic(y.ty)?;
                if xk == yk {
                    return Some(x.ty);
                }
                if xk.untyped_rank() > 0 && yk.untyped_rank() > 0 {
                    return Some(if xk.untyped_rank() >= yk.untyped_rank() {
                        x.ty
                    } else {
                        y.ty
                    });
                }
                self.mismatch(ctx, x.ty, y.ty)
            }
            (true, false) => Some(y.ty),
            (false, true) => Some(x.ty),
            (false, false) => {
                if self.unalias(x.ty) == self.unalias(y.ty) {
                    Some(x.ty)
                } else {
                    self.mismatch(ctx, x.ty, y.ty)
                }
            }
        }
    }

    fn mismatch(&mut self, ctx: EvalCtx, x: TypeId, y: TypeId) -> Option<TypeId> {
        let message = format!(
            "invalid operation: mismatched types {} and {}",
            self.type_name(x),
            self.type_name(y)
        );
        self.error(ctx.file, ctx.pos, message);
        None
    }

    fn binary(&mut self, ctx: EvalCtx, op: BinaryOp, x: Operand, y: Operand) -> Option<Operand> {
        if op.is_shift() {
            return self.shift(ctx, op, x, y);
        }

        let ty = self.unify(ctx, &x, &y)?;
        let kind = self.basic_kind_of(ty)?;
        let xv = represent_value(x.value, kind)?;
        let yv = represent_value(y.value, kind)?;

        if op.is_comparison() {
            let result = compare(op, &xv, &yv)?;
            return Some(self.untyped(BasicKind::UntypedBool, ConstValue::Bool(result)));
        }

        let value = match (op, xv, yv) {
            (BinaryOp::LogicalAnd, ConstValue::Bool(a), ConstValue::Bool(b)) => ConstValue::Bool(a && b),
            (BinaryOp::LogicalOr, ConstValue::Bool(a), ConstValue::Bool(b)) => ConstValue::Bool(a || b),
            (BinaryOp::Add, ConstValue::String(a), ConstValue::String(b)) => ConstValue::String(a + &b),
            (op, ConstValue::Int(a), ConstValue::Int(b)) => ConstValue::Int(int_op(op, a, b)?),
            (op, ConstValue::Float(a), ConstValue::Float(b)) => ConstValue::Float(float_op(op, a, b)?),
            _ => {
                let message = format!("invalid operation: operator {op:?} not defined on {}", self.type_name(ty));
                self.error(ctx.file, ctx.pos, message);
                return None;
            }
        };
        self.represent(ctx, value, ty)
    }

    fn shift(&mut self, ctx: EvalCtx, op: BinaryOp, x: Operand, y: Operand) -> Option<Operand> {
        let Some(count) = y.value.as_int().filter(|count| *count >= 0) else {
            self.error(ctx.file, ctx.pos, "invalid shift count".to_string());
            return None;
        };

        let (ty, value) = if self.is_untyped(x.ty) {
            // An untyped constant shifted must be integral and becomes an int.
            let value = x.value.as_int()?;
            let ty = match self.interner.as_basic(x.ty) {
                Some(BasicKind::UntypedRune) => x.ty,
                _ => self.interner.basic(BasicKind::UntypedInt),
            };
            (ty, value)
        } else {
            let kind = self.basic_kind_of(x.ty)?;
            if !kind.is_integer() {
                self.error(ctx.file, ctx.pos, "shifted operand must be integer".to_string());
                return None;
            }
            (x.ty, x.value.as_int()?)
        };

        let shifted = match op {
            BinaryOp::Shl => {
                if value == 0 {
                    0
                } else {
                    let factor = 1i128.checked_shl(u32::try_from(count).ok().filter(|c| *c < 127)?)?;
                    value.checked_mul(factor)?
                }
            }
            _ => value >> count.min(127),
        };
        self.represent(ctx, ConstValue::Int(shifted), ty)
    }
}

/// Convert `value` to a value of basic kind `kind`, failing when it does not
/// fit.
pub(crate) fn represent_value(value: ConstValue, kind: BasicKind) -> Option<ConstValue> {
    if kind.is_boolean() {
        return matches!(value, ConstValue::Bool(_)).then_some(value);
    }
    if kind.is_string() {
        return matches!(value, ConstValue::String(_)).then_some(value);
    }
    if kind.is_integer() {
        let int = value.as_int()?;
        if let Some(bits) = kind.bit_size() {
            let (min, max) = if kind.is_unsigned() {
                (0, (1i128 << bits) - 1)
            } else {
                (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
            };
            if int < min || int > max {
                return None;
            }
        }
        return Some(ConstValue::Int(int));
    }
    if kind.is_float() || kind.is_complex() {
        let float = value.as_float()?;
        let float = match kind {
            BasicKind::Float32 | BasicKind::Complex64 => f64::from(float as f32),
            _ => float,
        };
        return float.is_finite().then_some(ConstValue::Float(float));
    }
    None
}

fn compare(op: BinaryOp, x: &ConstValue, y: &ConstValue) -> Option<bool> {
    let ordering = match (x, y) {
        (ConstValue::Int(a), ConstValue::Int(b)) => a.cmp(b),
        (ConstValue::Float(a), ConstValue::Float(b)) => a.partial_cmp(b)?,
        (ConstValue::String(a), ConstValue::String(b)) => a.cmp(b),
        (ConstValue::Bool(a), ConstValue::Bool(b)) => {
            return match op {
                BinaryOp::Eql => Some(a == b),
                BinaryOp::Neq => Some(a != b),
                _ => None,
            };
        }
        _ => return None,
    };
    let result = match op {
        BinaryOp::Eql => ordering == Ordering::Equal,
        BinaryOp::Neq => ordering != Ordering::Equal,
        BinaryOp::Lss => ordering == Ordering::Less,
        BinaryOp::Leq => ordering != Ordering::Greater,
        BinaryOp::Gtr => ordering == Ordering::Greater,
        BinaryOp::Geq => ordering != Ordering::Less,
        _ => return None,
    };
    Some(result)
}

fn int_op(op: BinaryOp, a: i128, b: i128) -> Option<i128> {
    match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Quo => a.checked_div(b),
        BinaryOp::Rem => a.checked_rem(b),
        BinaryOp::And => Some(a & b),
        BinaryOp::Or => Some(a | b),
        BinaryOp::Xor => Some(a ^ b),
        BinaryOp::AndNot => Some(a & !b),
        _ => None,
    }
}

fn float_op(op: BinaryOp, a: f64, b: f64) -> Option<f64> {
    match op {
        BinaryOp::Add => Some(a + b),
        BinaryOp::Sub => Some(a - b),
        BinaryOp::Mul => Some(a * b),
        BinaryOp::Quo if b != 0.0 => Some(a / b),
        _ => None,
    }
}

fn done_slots(slots: FxHashMap<ObjectId, Slot<TypeId>>) -> FxHashMap<ObjectId, TypeId> {
    slots
        .into_iter()
        .filter_map(|(id, slot)| match slot {
            Slot::Done(ty) => Some((id, ty)),
            Slot::Active => None,
        })
        .collect()
}

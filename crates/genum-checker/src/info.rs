//! Checked package information, the result of `check_package`.

use crate::constant::ConstValue;
use crate::intern::TypeInterner;
use crate::scope::{Object, ObjectId, Scope};
use crate::types::{BasicKind, TypeId, TypeKey};
use rustc_hash::FxHashMap;

/// Alias chains longer than this are treated as cyclic.
const MAX_TYPE_DEPTH: usize = 64;

/// Type and value of one declared constant.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstInfo {
    pub object: ObjectId,
    /// `None` when the type could not be determined.
    pub ty: Option<TypeId>,
    /// `None` when the initialiser could not be evaluated.
    pub value: Option<ConstValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckDiagnostic {
    pub file: usize,
    pub pos: u32,
    pub message: String,
}

/// Shape of a type after following defined types and aliases to their
/// underlying types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeClass {
    Basic(BasicKind),
    Pointer(Box<TypeClass>),
    Struct,
    Other,
}

pub struct TypeInfo {
    pub(crate) interner: TypeInterner,
    pub(crate) objects: Vec<Object>,
    pub(crate) scope: Scope,
    pub(crate) object_types: Vec<Option<TypeId>>,
    pub(crate) underlying: FxHashMap<ObjectId, TypeId>,
    pub(crate) alias_targets: FxHashMap<ObjectId, TypeId>,
    pub(crate) consts: FxHashMap<(usize, u32), ConstInfo>,
    pub(crate) diagnostics: Vec<CheckDiagnostic>,
}

impl TypeInfo {
    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn diagnostics(&self) -> &[CheckDiagnostic] {
        &self.diagnostics
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0 as usize]
    }

    /// Look up a package-level name.
    pub fn lookup(&self, name: &str) -> Option<(ObjectId, &Object)> {
        let id = self.scope.lookup(name)?;
        Some((id, self.object(id)))
    }

    /// The type an object denotes (type names) or has (constants).
    pub fn type_of(&self, id: ObjectId) -> Option<TypeId> {
        self.object_types.get(id.0 as usize).copied().flatten()
    }

    /// Type and value of the constant declared by the identifier at `pos` in
    /// file `file`.
    pub fn const_at(&self, file: usize, pos: u32) -> Option<&ConstInfo> {
        self.consts.get(&(file, pos))
    }

    /// Follow alias declarations to the type they denote.
    pub fn unalias(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        for _ in 0..MAX_TYPE_DEPTH {
            match self.interner.lookup(current) {
                Some(TypeKey::Alias(object)) => {
                    current = self
                        .alias_targets
                        .get(object)
                        .copied()
                        .unwrap_or(TypeId::INVALID);
                }
                _ => return current,
            }
        }
        TypeId::INVALID
    }

    pub fn underlying(&self, ty: TypeId) -> TypeId {
        let ty = self.unalias(ty);
        match self.interner.lookup(ty) {
            Some(TypeKey::Named(object)) => self
                .underlying
                .get(object)
                .copied()
                .unwrap_or(TypeId::INVALID),
            _ => ty,
        }
    }

    /// Classify `ty` by its underlying structure. Pointer element types are
    /// classified recursively.
    pub fn classify(&self, ty: TypeId) -> TypeClass {
        self.classify_at(ty, 0)
    }

    fn classify_at(&self, ty: TypeId, depth: usize) -> TypeClass {
        if depth > MAX_TYPE_DEPTH {
            return TypeClass::Other;
        }
        let underlying = self.underlying(ty);
        match self.interner.lookup(underlying) {
            Some(TypeKey::Basic(kind)) => TypeClass::Basic(*kind),
            Some(TypeKey::Pointer(elem)) => {
                TypeClass::Pointer(Box::new(self.classify_at(*elem, depth + 1)))
            }
            Some(TypeKey::Struct { .. }) => TypeClass::Struct,
            _ => TypeClass::Other,
        }
    }

    /// Go-like spelling of a type, for log output.
    pub fn type_string(&self, ty: TypeId) -> String {
        self.type_string_at(ty, 0)
    }

    fn type_string_at(&self, ty: TypeId, depth: usize) -> String {
        if depth > MAX_TYPE_DEPTH {
            return "...".to_string();
        }
        let inner = |id: TypeId| self.type_string_at(id, depth + 1);
        match self.interner.lookup(ty) {
            None | Some(TypeKey::Invalid) => "invalid type".to_string(),
            Some(TypeKey::Basic(kind)) => kind.name().to_string(),
            Some(TypeKey::Named(object)) | Some(TypeKey::Alias(object)) => {
                self.object(*object).name.clone()
            }
            Some(TypeKey::Imported { path, name }) => format!("{path}.{name}"),
            Some(TypeKey::Pointer(elem)) => format!("*{}", inner(*elem)),
            Some(TypeKey::Slice(elem)) => format!("[]{}", inner(*elem)),
            Some(TypeKey::Array { elem, len }) => match len {
                Some(len) => format!("[{len}]{}", inner(*elem)),
                None => format!("[?]{}", inner(*elem)),
            },
            Some(TypeKey::Map { key, value }) => {
                format!("map[{}]{}", inner(*key), inner(*value))
            }
            Some(TypeKey::Chan(elem)) => format!("chan {}", inner(*elem)),
            Some(TypeKey::Func) => "func(...)".to_string(),
            Some(TypeKey::Struct { empty: true }) => "struct{}".to_string(),
            Some(TypeKey::Struct { empty: false }) => "struct{...}".to_string(),
            Some(TypeKey::Interface) => "interface{...}".to_string(),
        }
    }
}

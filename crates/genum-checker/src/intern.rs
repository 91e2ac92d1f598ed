//! Type interning.
//!
//! Converts `TypeKey` structures into `TypeId` handles, so type equality is a
//! `u32` comparison. Basic types are pre-registered at fixed ids.

use crate::types::{BasicKind, TypeId, TypeKey};
use rustc_hash::FxHashMap;

pub struct TypeInterner {
    keys: Vec<TypeKey>,
    ids: FxHashMap<TypeKey, TypeId>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    /// Create an interner with `Invalid` and every basic kind registered.
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            keys: Vec::with_capacity(64),
            ids: FxHashMap::default(),
        };
        interner.intern(TypeKey::Invalid);
        for kind in BasicKind::ALL {
            interner.intern(TypeKey::Basic(kind));
        }
        interner
    }

    pub fn intern(&mut self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = TypeId(self.keys.len() as u32);
        self.keys.push(key.clone());
        self.ids.insert(key, id);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<&TypeKey> {
        self.keys.get(id.0 as usize)
    }

    /// Id of a basic type. Never allocates.
    pub fn basic(&self, kind: BasicKind) -> TypeId {
        let index = BasicKind::ALL
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or(0);
        TypeId(index as u32 + 1)
    }

    /// The basic kind of `id` itself (not of its underlying type).
    pub fn as_basic(&self, id: TypeId) -> Option<BasicKind> {
        match self.lookup(id)? {
            TypeKey::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

//! Package-level objects and name lookup.

use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    TypeName { alias: bool },
    Const,
    Var,
    Func,
}

/// A package-level declared name.
#[derive(Clone, Debug)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
    /// Index of the declaring file in the package
    pub file: usize,
    /// Position of the declaring identifier
    pub pos: u32,
    /// Index of the declaration in its file
    pub decl: usize,
    /// Index of the spec (type names) or constant entry (constants) in the
    /// declaration
    pub index: usize,
}

impl Object {
    pub fn is_type_name(&self) -> bool {
        matches!(self.kind, ObjectKind::TypeName { .. })
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, ObjectKind::TypeName { alias: true })
    }
}

/// The package block: top-level names across every file of the package.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    names: FxHashMap<String, ObjectId>,
}

impl Scope {
    /// Declare `name`. Returns the existing object when the name is taken.
    pub fn insert(&mut self, name: &str, id: ObjectId) -> Result<(), ObjectId> {
        match self.names.get(name) {
            Some(&existing) => Err(existing),
            None => {
                self.names.insert(name.to_string(), id);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Imports of one file, by the name they bind.
#[derive(Clone, Debug, Default)]
pub struct FileScope {
    pub imports: FxHashMap<String, String>,
}

impl FileScope {
    /// The import path bound to `name`, if `name` is an imported package.
    pub fn package_path(&self, name: &str) -> Option<&str> {
        self.imports.get(name).map(String::as_str)
    }
}

/// Default package name for an import path: its last element.
pub fn default_import_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Predeclared functions.
pub(crate) fn is_builtin_func(name: &str) -> bool {
    matches!(
        name,
        "append"
            | "cap"
            | "clear"
            | "close"
            | "complex"
            | "copy"
            | "delete"
            | "imag"
            | "len"
            | "make"
            | "max"
            | "min"
            | "new"
            | "panic"
            | "print"
            | "println"
            | "real"
            | "recover"
    )
}

//! Typed traversal over the declaration model.
//!
//! Implementors override only the hooks they care about; the default
//! implementations keep walking.

use crate::ast::*;

pub trait Visitor {
    fn visit_file(&mut self, file: &SourceFile) {
        walk_file(self, file);
    }

    fn visit_gen_decl(&mut self, decl: &GenDecl) {
        walk_gen_decl(self, decl);
    }

    fn visit_func_decl(&mut self, _decl: &FuncDecl) {}

    fn visit_import_spec(&mut self, _spec: &ImportSpec) {}

    /// `index` is the position of the spec in its declaration, i.e. the
    /// value of `iota` for constant specs.
    fn visit_value_spec(&mut self, _decl: &GenDecl, _spec: &ValueSpec, _index: usize) {}

    fn visit_type_spec(&mut self, _spec: &TypeSpec) {}
}

pub fn walk_file<V: Visitor + ?Sized>(visitor: &mut V, file: &SourceFile) {
    for decl in &file.decls {
        match decl {
            Decl::Gen(decl) => visitor.visit_gen_decl(decl),
            Decl::Func(decl) => visitor.visit_func_decl(decl),
            Decl::Bad(_) => {}
        }
    }
}

pub fn walk_gen_decl<V: Visitor + ?Sized>(visitor: &mut V, decl: &GenDecl) {
    for (index, spec) in decl.specs.iter().enumerate() {
        match spec {
            Spec::Import(spec) => visitor.visit_import_spec(spec),
            Spec::Value(spec) => visitor.visit_value_spec(decl, spec, index),
            Spec::Type(spec) => visitor.visit_type_spec(spec),
        }
    }
}

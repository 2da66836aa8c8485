//! Rename applicator.
//!
//! Rewrites every binding-safe occurrence of the names in a [`RenameMap`] in a
//! single pass. Scope is not consulted: after deshadowing every binding has a
//! unique spelling, so substitution by name is exact.

use crate::bindings;
use std::collections::HashMap;
use swc_ecma_ast::{
    BreakStmt, ContinueStmt, Ident, ImportNamedSpecifier, LabeledStmt, NamedExport, ObjectPatProp,
    Program, Prop,
};
use swc_ecma_visit::{VisitMut, VisitMutWith};

/// Original name → final name.
pub type RenameMap = HashMap<String, String>;

/// Compose the name a labelled short identifier is renamed to.
///
/// The original name stays as a suffix so uniqueness from deshadowing survives.
#[must_use]
pub fn compose(label: &str, name: &str) -> String {
    format!("{label}${name}")
}

/// Apply `map` to `program`. Returns the number of rewritten occurrences.
pub fn apply(program: &mut Program, map: &RenameMap) -> usize {
    if map.is_empty() {
        return 0;
    }
    let mut renamer = Renamer { map, rewritten: 0 };
    program.visit_mut_with(&mut renamer);
    renamer.rewritten
}

struct Renamer<'a> {
    map: &'a RenameMap,
    rewritten: usize,
}

impl Renamer<'_> {
    fn rename(&mut self, ident: &mut Ident) {
        if let Some(new_name) = self.map.get(&*ident.sym) {
            ident.sym = new_name.as_str().into();
            self.rewritten += 1;
        }
    }
}

impl VisitMut for Renamer<'_> {
    fn visit_mut_ident(&mut self, n: &mut Ident) {
        self.rename(n);
    }

    fn visit_mut_prop(&mut self, n: &mut Prop) {
        if matches!(n, Prop::Shorthand(_)) {
            bindings::shorthand_prop(n, |ident| self.rename(ident));
        } else {
            n.visit_mut_children_with(self);
        }
    }

    fn visit_mut_object_pat_prop(&mut self, n: &mut ObjectPatProp) {
        if matches!(n, ObjectPatProp::Assign(_)) {
            bindings::shorthand_pat_prop(n, |assign| assign.visit_mut_children_with(self));
        } else {
            n.visit_mut_children_with(self);
        }
    }

    fn visit_mut_import_named_specifier(&mut self, n: &mut ImportNamedSpecifier) {
        bindings::import_local(n, |local| self.rename(local));
    }

    fn visit_mut_named_export(&mut self, n: &mut NamedExport) {
        bindings::local_export(n, |orig| self.rename(orig));
    }

    fn visit_mut_labeled_stmt(&mut self, n: &mut LabeledStmt) {
        n.body.visit_mut_with(self);
    }

    fn visit_mut_break_stmt(&mut self, _: &mut BreakStmt) {}

    fn visit_mut_continue_stmt(&mut self, _: &mut ContinueStmt) {}
}

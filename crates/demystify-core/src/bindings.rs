//! Binding-safe rewrites shared by the scope resolver and the rename pass.
//!
//! A property key is an external contract, so renaming the binding behind a
//! shorthand (`{ a }`) or an import/export specifier must keep the key that
//! the outside world sees. These helpers take the rename step as a closure,
//! run it, and expand the surrounding node when the name actually changed.

use swc_ecma_ast::{
    AssignPat, AssignPatProp, ExportSpecifier, Expr, Ident, IdentName, ImportNamedSpecifier,
    KeyValuePatProp, KeyValueProp, ModuleExportName, NamedExport, ObjectPatProp, Pat, Prop,
    PropName,
};

/// Rename the binding behind `{ a }`; expands to `{ a: renamed }` on change.
pub(crate) fn shorthand_prop(prop: &mut Prop, rename: impl FnOnce(&mut Ident)) {
    let Prop::Shorthand(ident) = prop else {
        return;
    };
    let key = IdentName {
        span: ident.span,
        sym: ident.sym.clone(),
    };
    rename(ident);
    if ident.sym == key.sym {
        return;
    }

    let value = Box::new(Expr::Ident(ident.clone()));
    *prop = Prop::KeyValue(KeyValueProp {
        key: PropName::Ident(key),
        value,
    });
}

/// Rename the binding behind `{ a }` / `{ a = d }` in a pattern.
///
/// Expands to `{ a: renamed }` or `{ a: renamed = d }` on change.
pub(crate) fn shorthand_pat_prop(prop: &mut ObjectPatProp, rename: impl FnOnce(&mut AssignPatProp)) {
    let ObjectPatProp::Assign(assign) = prop else {
        return;
    };
    let key = IdentName {
        span: assign.key.span,
        sym: assign.key.sym.clone(),
    };
    rename(assign);
    if assign.key.sym == key.sym {
        return;
    }

    let binding = Pat::Ident(assign.key.clone().into());
    let value = match assign.value.take() {
        Some(default) => Pat::Assign(AssignPat {
            span: assign.span,
            left: Box::new(binding),
            right: default,
        }),
        None => binding,
    };
    *prop = ObjectPatProp::KeyValue(KeyValuePatProp {
        key: PropName::Ident(key),
        value: Box::new(value),
    });
}

/// Rename an import's local binding, pinning the imported name if it was implicit.
pub(crate) fn import_local(named: &mut ImportNamedSpecifier, rename: impl FnOnce(&mut Ident)) {
    let before = named.local.clone();
    rename(&mut named.local);
    if named.local.sym != before.sym && named.imported.is_none() {
        named.imported = Some(ModuleExportName::Ident(before));
    }
}

/// Rename the local side of `export { a }`, pinning the exported name.
///
/// Re-exports (`export { a } from "m"`) name another module's bindings and are
/// left alone.
pub(crate) fn local_export(export: &mut NamedExport, mut rename: impl FnMut(&mut Ident)) {
    if export.src.is_some() {
        return;
    }
    for spec in &mut export.specifiers {
        let ExportSpecifier::Named(named) = spec else {
            continue;
        };
        let ModuleExportName::Ident(orig) = &mut named.orig else {
            continue;
        };
        let before = orig.clone();
        rename(orig);
        if orig.sym != before.sym && named.exported.is_none() {
            named.exported = Some(ModuleExportName::Ident(before));
        }
    }
}

//! Scope-aware deshadowing.
//!
//! Gives every declared binding in the program a globally unique name:
//! 1. Census every identifier spelling already in use
//! 2. Walk the tree depth-first with a stack of scope frames
//! 3. Rename a declaration whose base name was seen before (`x` → `x1`),
//!    and rewrite each later reference to the nearest frame's mapping
//!
//! `var` belongs to the nearest function frame, not the block it sits in, and a
//! `var` that re-declares a parameter or an earlier `var` of the same function
//! keeps that binding's name.
//!
//! Property keys, member property names, method names and labels are never
//! touched. Once every binding is unique, later passes can rename by plain
//! name substitution.

use crate::bindings;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BreakStmt, CatchClause, Constructor, ContinueStmt, Expr, ForInStmt,
    ForOfStmt, ForStmt, Function, GetterProp, Ident, ImportSpecifier, LabeledStmt, NamedExport,
    ObjectPatProp, Param, Program, Prop, SetterProp, StaticBlock, VarDecl, VarDeclKind,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitMut, VisitMutWith, VisitWith};

/// Counts from one resolver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Binding declarations seen.
    pub declarations: usize,
    /// Declarations that received a fresh suffix.
    pub renamed: usize,
}

/// Deshadow `program` in place.
///
/// Counters and frames live for this call only, so two runs never share state.
pub fn resolve(program: &mut Program) -> ResolveStats {
    let mut census = Census::default();
    program.visit_with(&mut census);

    let mut resolver = Resolver::new(census.names);
    program.visit_mut_with(&mut resolver);
    resolver.stats
}

// =============================================================================
// Census
// =============================================================================

#[derive(Default)]
struct Census {
    names: HashSet<String>,
}

impl Visit for Census {
    fn visit_ident(&mut self, n: &Ident) {
        self.names.insert(n.sym.to_string());
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Original name → name it resolves to within one lexical region.
#[derive(Default)]
struct Frame {
    names: HashMap<String, String>,
    /// Function bodies (and the program root) are where `var` lands.
    function: bool,
}

impl Frame {
    fn function() -> Self {
        Self {
            names: HashMap::new(),
            function: true,
        }
    }
}

/// What an identifier in the current pattern declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Not in a binding pattern: identifiers are references.
    None,
    /// `let`, `const`, parameters, catch parameters: the current frame.
    Lexical,
    /// `var`: the nearest function frame.
    Hoisted,
}

struct Resolver {
    frames: Vec<Frame>,
    /// Base name → times it has been re-declared so far.
    counts: HashMap<String, usize>,
    /// Spellings a composed name must avoid.
    taken: HashSet<String>,
    binding: Binding,
    /// Kind of the `VarDecl` whose declarators are being visited.
    var_kind: Binding,
    stats: ResolveStats,
}

impl Resolver {
    fn new(taken: HashSet<String>) -> Self {
        Self {
            frames: vec![Frame::function()],
            counts: HashMap::new(),
            taken,
            binding: Binding::None,
            var_kind: Binding::Lexical,
            stats: ResolveStats::default(),
        }
    }

    fn scoped(&mut self, frame: Frame, f: impl FnOnce(&mut Self)) {
        self.frames.push(frame);
        f(self);
        self.frames.pop();
    }

    fn block(&mut self, f: impl FnOnce(&mut Self)) {
        self.scoped(Frame::default(), f);
    }

    fn function(&mut self, f: impl FnOnce(&mut Self)) {
        self.scoped(Frame::function(), f);
    }

    fn in_binding(&mut self, binding: Binding, f: impl FnOnce(&mut Self)) {
        let prev = std::mem::replace(&mut self.binding, binding);
        f(self);
        self.binding = prev;
    }

    fn declare(&mut self, ident: &mut Ident, hoisted: bool) {
        let base = ident.sym.to_string();
        self.stats.declarations += 1;

        let target = if hoisted {
            self.frames.iter().rposition(|frame| frame.function).unwrap_or(0)
        } else {
            self.frames.len() - 1
        };

        // `var` re-declaring a parameter or an earlier `var` is the same binding.
        if hoisted {
            if let Some(existing) = self.frames[target].names.get(&base) {
                if *ident.sym != **existing {
                    ident.sym = existing.as_str().into();
                }
                return;
            }
        }

        let resolved = match self.counts.entry(base.clone()) {
            Entry::Occupied(mut slot) => {
                let count = slot.get_mut();
                loop {
                    *count += 1;
                    let candidate = format!("{base}{count}");
                    if !self.taken.contains(&candidate) {
                        break candidate;
                    }
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(0);
                base.clone()
            }
        };

        if resolved != base {
            self.taken.insert(resolved.clone());
            ident.sym = resolved.as_str().into();
            self.stats.renamed += 1;
        }
        self.frames[target].names.insert(base, resolved);
    }

    fn resolve_ident(&mut self, ident: &mut Ident) {
        let target = self
            .frames
            .iter()
            .rev()
            .find_map(|frame| frame.names.get(&*ident.sym))
            .cloned();
        if let Some(target) = target {
            if *ident.sym != *target {
                ident.sym = target.as_str().into();
            }
        }
    }
}

impl VisitMut for Resolver {
    fn visit_mut_function(&mut self, n: &mut Function) {
        self.function(|this| n.visit_mut_children_with(this));
    }

    fn visit_mut_arrow_expr(&mut self, n: &mut ArrowExpr) {
        self.function(|this| {
            this.in_binding(Binding::Lexical, |this| n.params.visit_mut_with(this));
            n.body.visit_mut_with(this);
        });
    }

    fn visit_mut_constructor(&mut self, n: &mut Constructor) {
        self.function(|this| n.visit_mut_children_with(this));
    }

    fn visit_mut_getter_prop(&mut self, n: &mut GetterProp) {
        n.key.visit_mut_with(self);
        self.function(|this| n.body.visit_mut_with(this));
    }

    fn visit_mut_setter_prop(&mut self, n: &mut SetterProp) {
        n.key.visit_mut_with(self);
        self.function(|this| {
            this.in_binding(Binding::Lexical, |this| n.param.visit_mut_with(this));
            n.body.visit_mut_with(this);
        });
    }

    fn visit_mut_static_block(&mut self, n: &mut StaticBlock) {
        self.function(|this| n.body.visit_mut_with(this));
    }

    fn visit_mut_block_stmt(&mut self, n: &mut BlockStmt) {
        self.block(|this| n.visit_mut_children_with(this));
    }

    fn visit_mut_catch_clause(&mut self, n: &mut CatchClause) {
        self.block(|this| {
            this.in_binding(Binding::Lexical, |this| n.param.visit_mut_with(this));
            n.body.visit_mut_with(this);
        });
    }

    fn visit_mut_for_stmt(&mut self, n: &mut ForStmt) {
        self.block(|this| n.visit_mut_children_with(this));
    }

    fn visit_mut_for_in_stmt(&mut self, n: &mut ForInStmt) {
        self.block(|this| n.visit_mut_children_with(this));
    }

    fn visit_mut_for_of_stmt(&mut self, n: &mut ForOfStmt) {
        self.block(|this| n.visit_mut_children_with(this));
    }

    fn visit_mut_var_decl(&mut self, n: &mut VarDecl) {
        let kind = if n.kind == VarDeclKind::Var {
            Binding::Hoisted
        } else {
            Binding::Lexical
        };
        let prev = std::mem::replace(&mut self.var_kind, kind);
        n.decls.visit_mut_with(self);
        self.var_kind = prev;
    }

    fn visit_mut_var_declarator(&mut self, n: &mut VarDeclarator) {
        let kind = self.var_kind;
        self.in_binding(kind, |this| n.name.visit_mut_with(this));
        n.init.visit_mut_with(self);
    }

    fn visit_mut_param(&mut self, n: &mut Param) {
        n.decorators.visit_mut_with(self);
        self.in_binding(Binding::Lexical, |this| n.pat.visit_mut_with(this));
    }

    fn visit_mut_import_specifier(&mut self, n: &mut ImportSpecifier) {
        match n {
            ImportSpecifier::Named(named) => {
                bindings::import_local(named, |local| self.declare(local, false));
            }
            ImportSpecifier::Default(default) => self.declare(&mut default.local, false),
            ImportSpecifier::Namespace(ns) => self.declare(&mut ns.local, false),
        }
    }

    fn visit_mut_named_export(&mut self, n: &mut NamedExport) {
        bindings::local_export(n, |orig| self.resolve_ident(orig));
    }

    // Defaults and computed keys inside a pattern are references.
    fn visit_mut_expr(&mut self, n: &mut Expr) {
        self.in_binding(Binding::None, |this| n.visit_mut_children_with(this));
    }

    fn visit_mut_prop(&mut self, n: &mut Prop) {
        if matches!(n, Prop::Shorthand(_)) {
            bindings::shorthand_prop(n, |ident| self.resolve_ident(ident));
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

    fn visit_mut_ident(&mut self, n: &mut Ident) {
        match self.binding {
            Binding::None => self.resolve_ident(n),
            Binding::Lexical => self.declare(n, false),
            Binding::Hoisted => self.declare(n, true),
        }
    }

    fn visit_mut_labeled_stmt(&mut self, n: &mut LabeledStmt) {
        n.body.visit_mut_with(self);
    }

    fn visit_mut_break_stmt(&mut self, _: &mut BreakStmt) {}

    fn visit_mut_continue_stmt(&mut self, _: &mut ContinueStmt) {}
}

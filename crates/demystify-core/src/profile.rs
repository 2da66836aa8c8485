//! Context frequency profiler.
//!
//! Walks the tree in document order remembering the last "meaningful"
//! identifier seen. Every binding-safe occurrence of a short name bumps the
//! count for that context, and the dominant context becomes the short name's
//! label.

use crate::rename::{compose, RenameMap};
use serde::Serialize;
use std::collections::HashMap;
use swc_ecma_ast::{BreakStmt, ContinueStmt, Ident, IdentName, LabeledStmt, Program};
use swc_ecma_visit::{Visit, VisitWith};

/// Identifier-shaped tokens that never serve as a context label.
pub const STOPLIST: &[&str] = &[
    "function",
    "class",
    "type",
    "name",
    "key",
    "value",
    "get",
    "set",
    "let",
    "var",
    "const",
    "generator",
    "await",
    "for",
];

/// Separator between tied labels and between a label and the original name.
pub const SEPARATOR: char = '$';

/// 1-2 lead chars from `[A-Za-z0-9$_]`, then any run of `[0-9_]`.
#[must_use]
pub fn is_short(name: &str) -> bool {
    let is_lead = |c: char| c.is_ascii_alphanumeric() || c == '$' || c == '_';
    let is_tail = |c: char| c.is_ascii_digit() || c == '_';

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_lead(c) => {}
        _ => return false,
    }
    let mut rest = chars.peekable();
    if rest.peek().is_some_and(|c| is_lead(*c)) {
        rest.next();
    }
    rest.all(is_tail)
}

fn is_meaningful(name: &str) -> bool {
    !is_short(name) && !STOPLIST.contains(&name)
}

// =============================================================================
// Histogram
// =============================================================================

/// Context counts for one short name, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub name: String,
    pub contexts: Vec<(String, u32)>,
}

impl Row {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contexts: Vec::new(),
        }
    }

    /// Count one more occurrence under `context`.
    pub fn bump(&mut self, context: &str) {
        match self.contexts.iter_mut().find(|(label, _)| label == context) {
            Some((_, count)) => *count += 1,
            None => self.contexts.push((context.to_string(), 1)),
        }
    }

    #[must_use]
    pub fn count(&self, context: &str) -> u32 {
        self.contexts
            .iter()
            .find(|(label, _)| label == context)
            .map_or(0, |(_, count)| *count)
    }

    /// Dominant context labels, filtered in a fixed order:
    /// highest count, then camel-cased over all-lowercase, then longest,
    /// then labels free of [`SEPARATOR`] when any exist.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let Some(max) = self.contexts.iter().map(|(_, count)| *count).max() else {
            return Vec::new();
        };
        let mut candidates: Vec<&str> = self
            .contexts
            .iter()
            .filter(|(_, count)| *count == max)
            .map(|(label, _)| label.as_str())
            .collect();

        if candidates.iter().any(|c| c.bytes().any(|b| b.is_ascii_uppercase())) {
            candidates.retain(|c| c.to_lowercase() != *c);
        }

        let longest = candidates.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        candidates.retain(|c| c.chars().count() == longest);

        if candidates.len() > 1 {
            let plain: Vec<&str> = candidates
                .iter()
                .copied()
                .filter(|c| !c.contains(SEPARATOR))
                .collect();
            if !plain.is_empty() {
                candidates = plain;
            }
        }

        candidates.into_iter().map(str::to_string).collect()
    }
}

/// Short name → context → occurrences. Rows iterate in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Histogram {
    rows: Vec<Row>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Histogram {
    pub fn record(&mut self, name: &str, context: &str) {
        let idx = match self.index.get(name) {
            Some(idx) => *idx,
            None => {
                self.rows.push(Row::new(name));
                self.index.insert(name.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        self.rows[idx].bump(context);
    }

    #[must_use]
    pub fn row(&self, name: &str) -> Option<&Row> {
        self.index.get(name).map(|idx| &self.rows[*idx])
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Derived names
// =============================================================================

/// A short name and the context labels chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongName {
    pub name: String,
    pub labels: Vec<String>,
}

impl LongName {
    /// Tied labels joined by [`SEPARATOR`].
    #[must_use]
    pub fn joined(&self) -> String {
        self.labels.join(&SEPARATOR.to_string())
    }

    /// Final spelling: `<joined>$<name>`.
    #[must_use]
    pub fn renamed(&self) -> String {
        compose(&self.joined(), &self.name)
    }
}

/// Build the context histogram for `program`.
pub fn profile(program: &Program) -> Histogram {
    let mut profiler = Profiler::default();
    program.visit_with(&mut profiler);
    profiler.histogram
}

/// Derive the long-name table, one entry per histogram row.
#[must_use]
pub fn long_names(histogram: &Histogram) -> Vec<LongName> {
    histogram
        .rows()
        .iter()
        .filter_map(|row| {
            let labels = row.labels();
            (!labels.is_empty()).then(|| LongName {
                name: row.name.clone(),
                labels,
            })
        })
        .collect()
}

#[must_use]
pub fn rename_map(long_names: &[LongName]) -> RenameMap {
    long_names
        .iter()
        .map(|long| (long.name.clone(), long.renamed()))
        .collect()
}

#[derive(Default)]
struct Profiler {
    last_meaningful: Option<String>,
    histogram: Histogram,
}

impl Profiler {
    fn observe(&mut self, name: &str, binding_safe: bool) {
        if is_meaningful(name) {
            self.last_meaningful = Some(name.to_string());
        } else if binding_safe {
            // Nothing to attribute before the first meaningful name.
            if let Some(context) = &self.last_meaningful {
                self.histogram.record(name, context);
            }
        }
    }
}

impl Visit for Profiler {
    fn visit_ident(&mut self, n: &Ident) {
        self.observe(&n.sym, true);
    }

    // Property keys, member properties and method names.
    fn visit_ident_name(&mut self, n: &IdentName) {
        self.observe(&n.sym, false);
    }

    fn visit_labeled_stmt(&mut self, n: &LabeledStmt) {
        n.body.visit_with(self);
    }

    fn visit_break_stmt(&mut self, _: &BreakStmt) {}

    fn visit_continue_stmt(&mut self, _: &ContinueStmt) {}
}

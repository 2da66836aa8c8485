//! Pipeline driver.
//!
//! ```text
//! source ─ parse ─ deshadow ─ print
//!                                │
//!         ┌──────────────────────┘
//!         ▼
//!   [ mine text ─ parse ─ rename ─ print ] × rounds
//!         │
//!         ▼
//!   profile contexts ─ rename ─ print ─ name anonymous functions ─ output
//! ```
//!
//! Each mining round scans freshly printed text, so renames from one round can
//! expose patterns for the next.

use crate::error::Error;
use crate::options::Options;
use crate::report::{Report, RoundReport};
use crate::syntax::{self, Ast};
use crate::{fixup, miner, profile, rename, scope};
use tracing::{debug, debug_span, trace};

/// Output text plus the diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demystified {
    pub code: String,
    pub report: Report,
}

/// Runs the renaming pipeline with a fixed set of options.
///
/// Every call to [`Demystifier::run`] owns its tree, counters and histogram;
/// nothing carries over between runs.
#[derive(Debug, Clone, Default)]
pub struct Demystifier {
    options: Options,
}

impl Demystifier {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run every pass over `source`.
    ///
    /// Fails only if some round's text does not parse or print.
    pub fn run(&self, source: &str) -> Result<Demystified, Error> {
        let kind = self.options.source_kind;

        let (mut ast, stats) = {
            let _span = debug_span!("resolve").entered();
            let mut ast = syntax::parse(source, kind)?;
            let stats = scope::resolve(&mut ast.program);
            debug!(
                declarations = stats.declarations,
                renamed = stats.renamed,
                "deshadowed"
            );
            (ast, stats)
        };
        let mut code = syntax::print(&ast)?;
        let mut report = Report::new(stats);

        for round in 0..self.options.rounds.limit() {
            let _span = debug_span!("mine", round).entered();

            let pairs = miner::mine(&code);
            for pair in &pairs {
                trace!(name = %pair.name, label = %pair.label, "candidate");
            }

            ast = syntax::parse(&code, kind)?;
            let renamed = rename::apply(&mut ast.program, &miner::rename_map(&pairs));
            code = syntax::print(&ast)?;
            debug!(pairs = pairs.len(), renamed, "round done");

            let exhausted = pairs.is_empty();
            report.rounds.push(RoundReport {
                round,
                pairs,
                renamed,
            });
            if exhausted && self.options.rounds.stops_when_empty() {
                break;
            }
        }

        if self.options.frequency_pass {
            let _span = debug_span!("profile").entered();
            let (long_names, renamed) = frequency_pass(&mut ast);
            for long in &long_names {
                trace!(name = %long.name, label = %long.joined(), "long name");
            }
            debug!(names = long_names.len(), renamed, "frequency pass done");

            code = syntax::print(&ast)?;
            report.long_names = long_names;
            report.frequency_renamed = renamed;
        }

        if self.options.name_functions {
            code = fixup::name_functions(&code);
        }

        Ok(Demystified { code, report })
    }
}

fn frequency_pass(ast: &mut Ast) -> (Vec<profile::LongName>, usize) {
    let histogram = profile::profile(&ast.program);
    let long_names = profile::long_names(&histogram);
    let renamed = rename::apply(&mut ast.program, &profile::rename_map(&long_names));
    (long_names, renamed)
}

/// Run the pipeline with default options and return the renamed source.
pub fn demystify(source: &str) -> Result<String, Error> {
    Demystifier::default().run(source).map(|out| out.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Rounds;
    use crate::syntax::SourceKind;

    fn mining_only() -> Demystifier {
        Demystifier::new(
            Options::default()
                .with_frequency_pass(false)
                .with_name_functions(false),
        )
    }

    #[test]
    fn test_literal_label_renames_every_occurrence() {
        let out = mining_only()
            .run("let a = 'fooBar.baz';\nuse(a);\nuse(a);\nuse(a);")
            .unwrap();
        assert_eq!(out.code.matches("fooBarBaz$a").count(), 4);
        assert!(!out.code.contains("(a)"));
        assert_eq!(out.report.rounds[0].renamed, 4);
    }

    #[test]
    fn test_fixed_rounds_run_even_when_empty() {
        let out = mining_only().run("foo();").unwrap();
        assert_eq!(out.report.rounds.len(), 3);
        assert!(out.report.pairs().next().is_none());
    }

    #[test]
    fn test_until_stable_stops_on_empty_round() {
        let demystifier = Demystifier::new(
            Options::default()
                .with_rounds(Rounds::UntilStable { max: 10 })
                .with_frequency_pass(false),
        );
        let out = demystifier.run("let a = 'fooBar.baz'; use(a);").unwrap();
        // Round 1 finds `a`; round 2 finds nothing new and ends mining.
        assert_eq!(out.report.rounds.len(), 2);
        assert!(out.report.rounds[1].pairs.is_empty());
    }

    #[test]
    fn test_frequency_pass_labels_short_names() {
        let demystifier = Demystifier::new(Options::default().with_name_functions(false));
        let out = demystifier
            .run("function handleResize(e) { return e.width; } handleResize(x); handleResize(x);")
            .unwrap();
        assert!(out.code.contains("handleResize$x"));
        assert!(out
            .report
            .long_names
            .iter()
            .any(|long| long.name == "x" && long.labels == ["handleResize"]));
    }

    #[test]
    fn test_function_naming_fixup() {
        let out = Demystifier::default()
            .run("var renderList = function() { return 1; };")
            .unwrap();
        assert!(out.code.contains("renderList = function $renderList("));
    }

    #[test]
    fn test_function_naming_keeps_outer_binding() {
        let out = Demystifier::default()
            .run("var render = 5; var o = { render: function() { return render; } };")
            .unwrap();
        assert!(out.code.contains("render : function $render("));
        assert!(out.code.contains("return render;"));
        syntax::parse(&out.code, SourceKind::Script).unwrap();
    }

    #[test]
    fn test_parse_error_aborts() {
        let err = demystify("let = ;").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_output_reparses() {
        let source = r"
var a = 'config.path', b = document.body;
function f(a) { var c = a.items; return c.map(function(d) { return d.id; }); }
var o = { go: function() { return f(a); } };
";
        let out = demystify(source).unwrap();
        syntax::parse(&out, SourceKind::Script).unwrap();
    }
}

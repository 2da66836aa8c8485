//! `demystify rename` command implementation.

use demystify_core::options::DEFAULT_MAX_ROUNDS;
use demystify_core::{Demystifier, Options, Report, Rounds, SourceKind};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Rename command action.
#[derive(Debug, Clone)]
pub struct RenameAction {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub report: bool,
    pub rounds: Option<usize>,
    pub until_stable: bool,
    pub module: bool,
    pub name_functions: bool,
    pub frequency_pass: bool,
    /// Options file loaded before flags are applied.
    pub config: Option<PathBuf>,
}

impl RenameAction {
    /// Config file values, then flags on top.
    pub fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_file(path).map_err(|e| miette::miette!("{e}"))?,
            None => Options::default(),
        };

        if self.module {
            options.source_kind = SourceKind::Module;
        }
        if self.until_stable {
            options.rounds = Rounds::UntilStable {
                max: self.rounds.unwrap_or(DEFAULT_MAX_ROUNDS),
            };
        } else if let Some(count) = self.rounds {
            options.rounds = Rounds::Fixed { count };
        }
        if !self.name_functions {
            options.name_functions = false;
        }
        if !self.frequency_pass {
            options.frequency_pass = false;
        }

        Ok(options)
    }
}

pub fn run(action: RenameAction, json: bool) -> Result<()> {
    let options = action.options()?;
    debug!(?options, "options resolved");

    let source = std::fs::read_to_string(&action.input)
        .map_err(|e| miette::miette!("Failed to read {}: {}", action.input.display(), e))?;

    let out = Demystifier::new(options)
        .run(&source)
        .map_err(|e| miette::miette!("{}: {}", e.code(), e))?;
    info!(
        rounds = out.report.rounds.len(),
        pairs = out.report.pairs().count(),
        long_names = out.report.long_names.len(),
        "renamed"
    );

    match &action.output {
        Some(path) => std::fs::write(path, &out.code)
            .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?,
        None => print!("{}", out.code),
    }

    if action.report {
        print_report(&out.report, json)?;
    }

    Ok(())
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string(report).into_diagnostic()?;
        eprintln!("{text}");
    } else {
        eprint!("{}", report.summary());
    }
    Ok(())
}

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]

//! Renaming engine for minified JavaScript.
//!
//! Three heuristics run over a parsed tree: scope deshadowing, literal-adjacency
//! mining and context-frequency profiling. Output always re-parses; the
//! frequency pass renames by spelling, so free globals that look short are
//! renamed too.

mod bindings;
pub mod error;
pub mod fixup;
pub mod miner;
pub mod options;
pub mod pipeline;
pub mod profile;
pub mod rename;
pub mod report;
pub mod scope;
pub mod syntax;
pub mod version;

pub use error::Error;
pub use options::{Options, Rounds};
pub use pipeline::{demystify, Demystified, Demystifier};
pub use report::{Report, RoundReport, REPORT_SCHEMA_VERSION};
pub use syntax::SourceKind;
pub use version::VERSION;

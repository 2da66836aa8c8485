use crate::error::Error;
use crate::syntax::SourceKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of mining rounds.
pub const DEFAULT_ROUNDS: usize = 3;

/// Upper bound for [`Rounds::UntilStable`] when a config file omits it.
pub const DEFAULT_MAX_ROUNDS: usize = 16;

/// How many print -> mine -> rename rounds the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Rounds {
    /// Exactly `count` rounds, whether or not they find anything.
    Fixed { count: usize },
    /// Stop after the first round that yields no candidate pairs, or after `max` rounds.
    UntilStable {
        #[serde(default = "default_max_rounds")]
        max: usize,
    },
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

impl Default for Rounds {
    fn default() -> Self {
        Self::Fixed {
            count: DEFAULT_ROUNDS,
        }
    }
}

impl Rounds {
    /// Most rounds this setting can run.
    #[must_use]
    pub fn limit(&self) -> usize {
        match *self {
            Self::Fixed { count } => count,
            Self::UntilStable { max } => max,
        }
    }

    /// Whether an empty round ends the mining phase early.
    #[must_use]
    pub fn stops_when_empty(&self) -> bool {
        matches!(self, Self::UntilStable { .. })
    }
}

/// Pipeline options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Grammar goal used for every parse.
    pub source_kind: SourceKind,

    /// Mining round policy.
    pub rounds: Rounds,

    /// Splice a name into anonymous functions assigned to a name.
    pub name_functions: bool,

    /// Run the context frequency pass after mining.
    pub frequency_pass: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source_kind: SourceKind::default(),
            rounds: Rounds::default(),
            name_functions: true,
            frequency_pass: true,
        }
    }
}

impl Options {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_source_kind(mut self, kind: SourceKind) -> Self {
        self.source_kind = kind;
        self
    }

    #[must_use]
    pub fn with_rounds(mut self, rounds: Rounds) -> Self {
        self.rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_name_functions(mut self, enabled: bool) -> Self {
        self.name_functions = enabled;
        self
    }

    #[must_use]
    pub fn with_frequency_pass(mut self, enabled: bool) -> Self {
        self.frequency_pass = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_three_round_pipeline() {
        let opts = Options::default();
        assert_eq!(opts.rounds, Rounds::Fixed { count: 3 });
        assert_eq!(opts.source_kind, SourceKind::Script);
        assert!(opts.name_functions);
        assert!(opts.frequency_pass);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: Options =
            serde_json::from_str(r#"{"rounds":{"mode":"until_stable"},"name_functions":false}"#)
                .unwrap();
        assert_eq!(opts.rounds, Rounds::UntilStable { max: DEFAULT_MAX_ROUNDS });
        assert!(!opts.name_functions);
        assert!(opts.frequency_pass);
    }

    #[test]
    fn test_rounds_limit() {
        assert_eq!(Rounds::Fixed { count: 5 }.limit(), 5);
        assert!(!Rounds::Fixed { count: 5 }.stops_when_empty());
        assert!(Rounds::UntilStable { max: 2 }.stops_when_empty());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demystify.json");
        std::fs::write(&path, r#"{"source_kind":"module","rounds":{"mode":"fixed","count":1}}"#)
            .unwrap();

        let opts = Options::from_file(&path).unwrap();
        assert_eq!(opts.source_kind, SourceKind::Module);
        assert_eq!(opts.rounds, Rounds::Fixed { count: 1 });
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Options::from_file(&missing),
            Err(Error::ConfigRead { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            Options::from_file(&bad),
            Err(Error::ConfigParse { .. })
        ));
    }
}

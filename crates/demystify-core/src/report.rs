//! Diagnostic side channel of a pipeline run.
//!
//! Not needed for correctness. Useful when tuning the heuristics: it shows
//! which literal pairs each round found and which context labels won.

use crate::miner::CandidatePair;
use crate::profile::LongName;
use crate::scope::ResolveStats;
use serde::Serialize;
use std::fmt::Write;

/// Report schema version. Bump when changing the JSON shape.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// One mining round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    /// Zero-based round index.
    pub round: usize,
    pub pairs: Vec<CandidatePair>,
    /// Identifier occurrences rewritten in this round.
    pub renamed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub resolve: ResolveStats,
    pub rounds: Vec<RoundReport>,
    /// Empty when the frequency pass is disabled.
    pub long_names: Vec<LongName>,
    /// Identifier occurrences rewritten by the frequency pass.
    pub frequency_renamed: usize,
}

impl Report {
    #[must_use]
    pub fn new(resolve: ResolveStats) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            resolve,
            rounds: Vec::new(),
            long_names: Vec::new(),
            frequency_renamed: 0,
        }
    }

    /// All candidate pairs across rounds, in discovery order.
    pub fn pairs(&self) -> impl Iterator<Item = &CandidatePair> {
        self.rounds.iter().flat_map(|round| round.pairs.iter())
    }

    /// Human-readable multi-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "scope: {} declarations, {} renamed",
            self.resolve.declarations, self.resolve.renamed
        );
        for round in &self.rounds {
            let _ = writeln!(
                out,
                "round {}: {} pairs, {} occurrences renamed",
                round.round + 1,
                round.pairs.len(),
                round.renamed
            );
            for pair in &round.pairs {
                let _ = writeln!(out, "  {} -> {} ({})", pair.name, pair.label, pair.value);
            }
        }
        let _ = writeln!(
            out,
            "frequency: {} names, {} occurrences renamed",
            self.long_names.len(),
            self.frequency_renamed
        );
        for long in &self.long_names {
            let _ = writeln!(out, "  {} -> {}", long.name, long.joined());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_pairs_and_long_names() {
        let mut report = Report::new(ResolveStats {
            declarations: 4,
            renamed: 1,
        });
        report.rounds.push(RoundReport {
            round: 0,
            pairs: vec![CandidatePair {
                name: "a".to_string(),
                value: "fooBar.baz".to_string(),
                label: "fooBarBaz".to_string(),
            }],
            renamed: 4,
        });
        report.long_names.push(LongName {
            name: "b".to_string(),
            labels: vec!["onClick".to_string()],
        });

        let summary = report.summary();
        assert!(summary.contains("scope: 4 declarations, 1 renamed"));
        assert!(summary.contains("round 1: 1 pairs, 4 occurrences renamed"));
        assert!(summary.contains("a -> fooBarBaz (fooBar.baz)"));
        assert!(summary.contains("b -> onClick"));
        assert_eq!(report.pairs().count(), 1);
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report::new(ResolveStats::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["schema_version"], REPORT_SCHEMA_VERSION);
        assert!(json["rounds"].as_array().unwrap().is_empty());
        assert_eq!(json["resolve"]["renamed"], 0);
    }
}

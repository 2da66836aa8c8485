//! Literal-adjacency pattern miner.
//!
//! Scans canonical printed source for short names initialised with a
//! literal-looking value and turns the value into a label:
//!
//! ```text
//! let a = "fooBar.baz";      →  (a, fooBarBaz)
//! var t = e.target.value;    →  (t, eTargetValue)   (skipped: second char is '.')
//! , cfg = options.retries    →  (cfg, optionsRetries)
//! ```
//!
//! Recognised shape, in order:
//! - `let`, `var`, `const` or `,`
//! - whitespace, then a short name: 1-3 of `[A-Za-z0-9$_]`, then any `[0-9_]`
//! - `=`, an optional quote
//! - a value of 4+ chars from `[A-Za-z0-9.$_]`, starting with `[A-Za-z$_]`
//!
//! Misses are fine. False positives are bounded by dropping every name that
//! matches more than once in the document.

use crate::rename::{compose, RenameMap};
use regex_lite::Regex;
use serde::Serialize;

/// Textual declaration shape the miner looks for.
pub const DECLARATION_PATTERN: &str =
    r#"(let|var|const|,)\s+[A-Za-z0-9$_]{1,3}[0-9_]*\s*=\s*['"]?[A-Za-z$_][A-Za-z0-9.$_]{3,}"#;

/// A short name and the label derived from its literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePair {
    pub name: String,
    /// Value text as matched, quotes removed.
    pub value: String,
    pub label: String,
}

/// Mine candidate pairs from printed source, in match order.
///
/// No match is not an error; it yields an empty vector.
pub fn mine(text: &str) -> Vec<CandidatePair> {
    let Ok(re) = Regex::new(DECLARATION_PATTERN) else {
        return Vec::new();
    };

    let matches: Vec<(String, String)> = re
        .find_iter(text)
        .filter_map(|m| split_match(m.as_str()))
        .collect();

    matches
        .iter()
        .filter(|(name, _)| matches.iter().filter(|(other, _)| other == name).count() == 1)
        .filter(|(_, value)| value != "function" && value.chars().nth(1) != Some('.'))
        .map(|(name, value)| CandidatePair {
            name: name.clone(),
            value: value.clone(),
            label: to_label(value),
        })
        .collect()
}

/// Rename map for a round of candidate pairs: `name` → `label$name`.
#[must_use]
pub fn rename_map(pairs: &[CandidatePair]) -> RenameMap {
    pairs
        .iter()
        .map(|pair| (pair.name.clone(), compose(&pair.label, &pair.name)))
        .collect()
}

/// Split `let a = 'x.y'` into `("a", "x.y")`.
fn split_match(matched: &str) -> Option<(String, String)> {
    let unquoted: String = matched.chars().filter(|c| *c != '\'' && *c != '"').collect();
    let (lhs, rhs) = unquoted.split_once('=')?;
    let name = lhs.split_whitespace().last()?;
    let value = rhs.split_whitespace().last()?;
    Some((name.to_string(), value.to_string()))
}

/// Drop path separators, upper-casing the character after each run of them.
///
/// `fooBar.baz` → `fooBarBaz`. A trailing separator is dropped.
#[must_use]
pub fn to_label(value: &str) -> String {
    let mut label = String::with_capacity(value.len());
    let mut upper_next = false;
    for c in value.chars() {
        if c == '.' {
            upper_next = true;
        } else if upper_next {
            label.extend(c.to_uppercase());
            upper_next = false;
        } else {
            label.push(c);
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pairs: &[CandidatePair]) -> Vec<&str> {
        pairs.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_string_literal_declaration() {
        let pairs = mine("let a = 'fooBar.baz';\nuse(a);");
        assert_eq!(
            pairs,
            vec![CandidatePair {
                name: "a".to_string(),
                value: "fooBar.baz".to_string(),
                label: "fooBarBaz".to_string(),
            }]
        );
    }

    #[test]
    fn test_property_path_and_comma_declarators() {
        let pairs = mine("var cfg = options.retries, t = \"click\";");
        assert_eq!(names(&pairs), vec!["cfg", "t"]);
        assert_eq!(pairs[0].label, "optionsRetries");
        assert_eq!(pairs[1].label, "click");
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(mine("").is_empty());
        assert!(mine("foo(bar);\nlet longName = 1;").is_empty());
    }

    #[test]
    fn test_ambiguous_names_dropped() {
        let pairs = mine("let a = 'first';\nlet b = 'other';\nvar a = 'second';");
        assert_eq!(names(&pairs), vec!["b"]);
    }

    #[test]
    fn test_ambiguity_checked_before_exclusions() {
        // The `function` match still makes `a` ambiguous.
        let pairs = mine("var a = function() {};\nlet a = 'label';");
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_function_and_single_char_paths_excluded() {
        let pairs = mine("var f = function() {};\nvar t = e.target;\nvar ok = this.state;");
        assert_eq!(names(&pairs), vec!["ok"]);
        assert_eq!(pairs[0].label, "thisState");
    }

    #[test]
    fn test_short_value_ignored() {
        assert!(mine("let a = 'abc';").is_empty());
        assert_eq!(names(&mine("let a = 'abcd';")), vec!["a"]);
    }

    #[test]
    fn test_trailing_digits_in_name() {
        let pairs = mine("let ab12 = 'widthValue';");
        assert_eq!(names(&pairs), vec!["ab12"]);
    }

    #[test]
    fn test_to_label() {
        assert_eq!(to_label("fooBar.baz"), "fooBarBaz");
        assert_eq!(to_label("a1.b.c"), "a1BC");
        assert_eq!(to_label("plain"), "plain");
        assert_eq!(to_label("foo..bar"), "fooBar");
        assert_eq!(to_label("abcd."), "abcd");
    }

    #[test]
    fn test_rename_map() {
        let map = rename_map(&mine("let a = 'fooBar.baz';"));
        assert_eq!(map.get("a").map(String::as_str), Some("fooBarBaz$a"));
    }
}

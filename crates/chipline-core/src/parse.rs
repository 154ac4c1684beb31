//! Separator sets and tag extraction rules.
//!
//! Two extraction modes exist across tag-input revisions: whole-text
//! splitting triggered by separator characters, and regex extraction where
//! every non-overlapping match becomes a candidate token. Both are folded
//! into [`ParseRule`].

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default separator characters that trigger tag extraction.
pub const DEFAULT_SEPARATORS: [char; 4] = [',', ' ', ';', '\n'];

/// Ordered set of single characters that trigger tag extraction when typed
/// as the most recent character of the pending text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorSet {
    chars: Vec<char>,
}

impl SeparatorSet {
    /// Create a separator set from a slice of characters.
    pub fn new(chars: &[char]) -> Self {
        let mut out = Vec::with_capacity(chars.len());
        for &c in chars {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self { chars: out }
    }

    /// Check whether a character is a separator.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// The separator characters, in configuration order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self::new(&DEFAULT_SEPARATORS)
    }
}

/// How candidate tag tokens are extracted from the pending text.
#[derive(Debug, Clone)]
pub enum ParseRule {
    /// The entire pending text becomes a single candidate token.
    ///
    /// This is the separator-triggered mode: the caller decides *when* to
    /// extract (a separator was typed, submit, blur); the rule itself takes
    /// the whole text, untrimmed.
    Separators,
    /// Every non-overlapping match of the pattern becomes a candidate token,
    /// in match order.
    Regex(Regex),
}

impl ParseRule {
    /// Extract candidate tokens from the pending text.
    ///
    /// Candidates are returned before de-duplication against the existing
    /// tag sequence. Empty text never yields candidates; a pattern that
    /// matches nothing yields an empty vec, not an error.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        match self {
            ParseRule::Separators => vec![text.to_string()],
            ParseRule::Regex(re) => re
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect(),
        }
    }
}

impl Default for ParseRule {
    fn default() -> Self {
        ParseRule::Separators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_separators() {
        let set = SeparatorSet::default();
        assert!(set.contains(','));
        assert!(set.contains(' '));
        assert!(set.contains(';'));
        assert!(set.contains('\n'));
        assert!(!set.contains('a'));
    }

    #[test]
    fn test_separator_set_dedup() {
        let set = SeparatorSet::new(&[',', ',', ';']);
        assert_eq!(set.chars(), &[',', ';']);
    }

    #[test]
    fn test_separator_rule_takes_whole_text() {
        let rule = ParseRule::Separators;
        assert_eq!(rule.extract("hello world"), vec!["hello world"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(ParseRule::Separators.extract("").is_empty());
        let re = Regex::new(r"\w+").unwrap();
        assert!(ParseRule::Regex(re).extract("").is_empty());
    }

    #[test]
    fn test_regex_rule_matches_in_order() {
        let re = Regex::new(r"[^\s,]+@[^\s,]+").unwrap();
        let rule = ParseRule::Regex(re);
        assert_eq!(
            rule.extract("x@y.com z@y.com,"),
            vec!["x@y.com", "z@y.com"]
        );
    }

    #[test]
    fn test_regex_rule_no_matches() {
        let re = Regex::new(r"\d+").unwrap();
        assert!(ParseRule::Regex(re).extract("no digits here").is_empty());
    }
}

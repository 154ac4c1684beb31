//! The tag collection: pending text plus a mirror of the caller-owned
//! sequence.
//!
//! This is a controlled input. The collection never owns the canonical tag
//! list; every mutating operation returns [`Effect`] intents, and the caller
//! commits an [`Effect::Change`] by pushing the new sequence back in through
//! [`TagCollection::set_value`]. Until then the mirror keeps rendering the
//! old sequence, exactly like a controlled form element.

use crate::config::TagInputConfig;
use crate::error::Result;
use crate::parse::{ParseRule, SeparatorSet};
use crate::tag::TagValue;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Who owns the pending text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextMode {
    /// The collection owns the buffer and clears it itself after a parse.
    #[default]
    Managed,
    /// The caller owns the buffer. The collection keeps a mirror for
    /// parsing and emits [`Effect::ClearText`] instead of clearing silently.
    Controlled,
}

/// Intent emitted by a collection operation.
///
/// `Change` carries the full next sequence; the owner decides whether to
/// commit it.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<T> {
    /// The tag sequence should become this value.
    Change(Vec<T>),
    /// The caller-owned pending text should be cleared (controlled mode).
    ClearText,
    /// Focus should return to the input field.
    RequestFocus,
    /// The view should scroll to the end (scrolling variants only).
    RequestScrollToEnd,
}

/// Tag state and parsing.
#[derive(Debug, Clone)]
pub struct TagCollection<T: TagValue> {
    value: Vec<T>,
    pending: String,
    separators: SeparatorSet,
    rule: ParseRule,
    parse_on_blur: bool,
    max_tags: Option<usize>,
    text_mode: TextMode,
}

impl<T: TagValue> TagCollection<T> {
    /// Create a collection from a configuration.
    ///
    /// Fails only if the configured extraction pattern does not compile.
    pub fn new(config: &TagInputConfig) -> Result<Self> {
        Ok(Self {
            value: Vec::new(),
            pending: String::new(),
            separators: config.separators.clone(),
            rule: config.parse_rule()?,
            parse_on_blur: config.parse_on_blur,
            max_tags: config.max_tags,
            text_mode: config.text_mode,
        })
    }

    /// Commit the caller-owned sequence into the mirror.
    ///
    /// The order is caller-authoritative; the collection never reorders it.
    pub fn set_value(&mut self, value: Vec<T>) {
        self.value = value;
    }

    /// The mirrored tag sequence.
    pub fn value(&self) -> &[T] {
        &self.value
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether `max_tags` has been reached (input field is suppressed).
    pub fn is_full(&self) -> bool {
        self.max_tags.is_some_and(|max| self.value.len() >= max)
    }

    /// The not-yet-committed text in the trailing input field.
    pub fn pending_text(&self) -> &str {
        &self.pending
    }

    /// Push the caller-owned pending text into the mirror (controlled mode).
    pub fn set_pending_text(&mut self, text: &str) {
        self.pending = text.to_string();
    }

    /// Replace the pending text with a new value from a keystroke or text
    /// change event. If the most recent character is a separator, the text
    /// preceding it is parsed.
    pub fn on_text_changed(&mut self, new_text: &str) -> Vec<Effect<T>> {
        self.pending = new_text.to_string();

        if let Some(last) = new_text.chars().last() {
            if self.separators.contains(last) {
                // Parse the text as it was before the separator landed.
                let preceding = &new_text[..new_text.len() - last.len_utf8()];
                return self.parse_text(preceding.to_string());
            }
        }
        Vec::new()
    }

    /// Apply the parse rule to the current pending text.
    ///
    /// Candidates are unioned into the sequence with value-equality dedup in
    /// first-seen order. Pending text is cleared iff at least one candidate
    /// was produced; with zero candidates the text is untouched and no
    /// effects are emitted.
    pub fn parse(&mut self) -> Vec<Effect<T>> {
        let text = self.pending.clone();
        self.parse_text(text)
    }

    fn parse_text(&mut self, text: String) -> Vec<Effect<T>> {
        let candidates: Vec<T> = self
            .rule
            .extract(&text)
            .iter()
            .filter_map(|token| T::from_input(token))
            .collect();

        if candidates.is_empty() {
            return Vec::new();
        }
        trace!(count = candidates.len(), "parsed tag candidates");

        let mut next = self.value.clone();
        for tag in candidates {
            if self.max_tags.is_some_and(|max| next.len() >= max) {
                break;
            }
            if !next.contains(&tag) {
                next.push(tag);
            }
        }

        let mut effects = Vec::new();
        self.pending.clear();
        if self.text_mode == TextMode::Controlled {
            effects.push(Effect::ClearText);
        }
        self.value = next.clone();
        effects.push(Effect::Change(next));
        effects
    }

    /// Backspace pressed while the pending text is empty: remove the last
    /// tag. No-op on an empty sequence or when text is still being edited.
    pub fn on_backspace(&mut self) -> Vec<Effect<T>> {
        if !self.pending.is_empty() || self.value.is_empty() {
            return Vec::new();
        }
        let mut next = self.value.clone();
        next.pop();
        self.value = next.clone();
        vec![
            Effect::Change(next),
            Effect::RequestFocus,
            Effect::RequestScrollToEnd,
        ]
    }

    /// Remove the tag at `index` (chip dismiss).
    ///
    /// An out-of-range index is a programming error: the index comes from a
    /// rendered chip, so it is always valid in practice. Debug builds assert;
    /// release builds no-op.
    pub fn remove_at(&mut self, index: usize) -> Vec<Effect<T>> {
        debug_assert!(index < self.value.len(), "remove_at index out of range");
        if index >= self.value.len() {
            return Vec::new();
        }
        let mut next = self.value.clone();
        next.remove(index);
        self.value = next.clone();
        vec![Effect::Change(next), Effect::RequestFocus]
    }

    /// Focus left the input field. Parses only when `parse_on_blur` is set.
    pub fn on_blur(&mut self) -> Vec<Effect<T>> {
        if self.parse_on_blur {
            self.parse()
        } else {
            Vec::new()
        }
    }

    /// Explicit submit: always attempts a parse of the pending text.
    pub fn on_submit(&mut self) -> Vec<Effect<T>> {
        self.parse()
    }

    /// Programmatically append a tag, bypassing parsing.
    ///
    /// Dedup and `max_tags` still apply. The pending text is cleared: the
    /// appended tag replaces whatever was being typed (accepting a
    /// suggestion is the typical use).
    pub fn add_custom_tag(&mut self, tag: T) -> Vec<Effect<T>> {
        if self.value.contains(&tag) || self.is_full() {
            return Vec::new();
        }
        let mut next = self.value.clone();
        next.push(tag);
        self.value = next.clone();

        let mut effects = Vec::new();
        self.pending.clear();
        if self.text_mode == TextMode::Controlled {
            effects.push(Effect::ClearText);
        }
        effects.push(Effect::Change(next));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TagInputConfig;

    fn collection(config: &TagInputConfig) -> TagCollection<String> {
        TagCollection::new(config).unwrap()
    }

    fn changed(effects: &[Effect<String>]) -> Option<Vec<String>> {
        effects.iter().find_map(|e| match e {
            Effect::Change(v) => Some(v.clone()),
            _ => None,
        })
    }

    #[test]
    fn test_separator_commits_preceding_text() {
        let config = TagInputConfig::default().with_separators(&[',', ' ']);
        let mut c = collection(&config);
        c.set_value(vec!["a".to_string()]);

        c.on_text_changed("b");
        let effects = c.on_text_changed("b,");
        assert_eq!(
            changed(&effects),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(c.pending_text(), "");
    }

    #[test]
    fn test_separator_with_empty_preceding_text_is_noop() {
        let mut c = collection(&TagInputConfig::default());
        let effects = c.on_text_changed(",");
        assert!(effects.is_empty());
        // Text is untouched when zero candidates are produced.
        assert_eq!(c.pending_text(), ",");
    }

    #[test]
    fn test_non_separator_text_does_not_parse() {
        let mut c = collection(&TagInputConfig::default());
        let effects = c.on_text_changed("hello");
        assert!(effects.is_empty());
        assert_eq!(c.pending_text(), "hello");
    }

    #[test]
    fn test_regex_mode_extracts_emails_in_order() {
        let config = TagInputConfig::default().with_pattern(r"[^\s,;]+@[^\s,;]+");
        let mut c = collection(&config);

        c.set_pending_text("x@y.com z@y.com,");
        let effects = c.parse();
        assert_eq!(
            changed(&effects),
            Some(vec!["x@y.com".to_string(), "z@y.com".to_string()])
        );
        assert_eq!(c.pending_text(), "");
    }

    #[test]
    fn test_regex_mode_skips_existing_tags() {
        let config = TagInputConfig::default().with_pattern(r"\w+");
        let mut c = collection(&config);
        c.set_value(vec!["b".to_string()]);

        c.set_pending_text("a b c");
        let effects = c.parse();
        assert_eq!(
            changed(&effects),
            Some(vec!["b".to_string(), "a".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let mut c = collection(&TagInputConfig::default());
        c.set_pending_text("tag");
        assert!(!c.parse().is_empty());
        // Pending text is already empty; second call is a no-op.
        assert!(c.parse().is_empty());
    }

    #[test]
    fn test_duplicate_candidates_are_unioned_once() {
        let config = TagInputConfig::default().with_pattern(r"\w+");
        let mut c = collection(&config);
        c.set_pending_text("a a b");
        let effects = c.parse();
        assert_eq!(changed(&effects), Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_backspace_pops_last_tag() {
        let mut c = collection(&TagInputConfig::default());
        c.set_value(vec!["a".to_string(), "b".to_string()]);

        let effects = c.on_backspace();
        assert_eq!(changed(&effects), Some(vec!["a".to_string()]));
        assert!(effects.contains(&Effect::RequestFocus));
        assert!(effects.contains(&Effect::RequestScrollToEnd));
    }

    #[test]
    fn test_backspace_with_pending_text_is_noop() {
        let mut c = collection(&TagInputConfig::default());
        c.set_value(vec!["a".to_string()]);
        c.on_text_changed("b");

        assert!(c.on_backspace().is_empty());
        assert_eq!(c.value(), &["a".to_string()]);
    }

    #[test]
    fn test_backspace_on_empty_sequence_is_noop() {
        let mut c = collection(&TagInputConfig::default());
        assert!(c.on_backspace().is_empty());
    }

    #[test]
    fn test_remove_at() {
        let mut c = collection(&TagInputConfig::default());
        c.set_value(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

        let effects = c.remove_at(1);
        assert_eq!(
            changed(&effects),
            Some(vec!["a".to_string(), "c".to_string()])
        );
        assert!(effects.contains(&Effect::RequestFocus));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_remove_at_out_of_range_is_noop_in_release() {
        let mut c = collection(&TagInputConfig::default());
        c.set_value(vec!["a".to_string()]);
        assert!(c.remove_at(5).is_empty());
    }

    #[test]
    fn test_blur_parses_only_when_configured() {
        let mut c = collection(&TagInputConfig::default());
        c.set_pending_text("tag");
        assert!(c.on_blur().is_empty());
        assert_eq!(c.pending_text(), "tag");

        let config = TagInputConfig::default().with_parse_on_blur(true);
        let mut c = collection(&config);
        c.set_pending_text("tag");
        let effects = c.on_blur();
        assert_eq!(changed(&effects), Some(vec!["tag".to_string()]));
        assert_eq!(c.pending_text(), "");
    }

    #[test]
    fn test_submit_always_parses() {
        let mut c = collection(&TagInputConfig::default());
        c.set_pending_text("tag");
        let effects = c.on_submit();
        assert_eq!(changed(&effects), Some(vec!["tag".to_string()]));
    }

    #[test]
    fn test_max_tags_caps_parse_and_reports_full() {
        let config = TagInputConfig::default()
            .with_pattern(r"\w+")
            .with_max_tags(2);
        let mut c = collection(&config);

        c.set_pending_text("a b c");
        let effects = c.parse();
        assert_eq!(changed(&effects), Some(vec!["a".to_string(), "b".to_string()]));
        assert!(c.is_full());
    }

    #[test]
    fn test_add_custom_tag() {
        let mut c = collection(&TagInputConfig::default());
        c.on_text_changed("sugg");

        let effects = c.add_custom_tag("Suggested".to_string());
        assert_eq!(changed(&effects), Some(vec!["Suggested".to_string()]));
        assert_eq!(c.pending_text(), "");

        // Duplicate append is rejected.
        assert!(c.add_custom_tag("Suggested".to_string()).is_empty());
    }

    #[test]
    fn test_controlled_mode_emits_clear_text() {
        let config = TagInputConfig::default().with_text_mode(TextMode::Controlled);
        let mut c = collection(&config);
        c.set_pending_text("tag");

        let effects = c.on_submit();
        assert!(effects.contains(&Effect::ClearText));
    }

    #[test]
    fn test_managed_mode_does_not_emit_clear_text() {
        let mut c = collection(&TagInputConfig::default());
        c.set_pending_text("tag");
        let effects = c.on_submit();
        assert!(!effects.contains(&Effect::ClearText));
    }

    #[test]
    fn test_caller_order_is_preserved() {
        let config = TagInputConfig::default().with_pattern(r"\w+");
        let mut c = collection(&config);
        c.set_value(vec!["z".to_string(), "a".to_string()]);

        c.set_pending_text("m");
        let effects = c.parse();
        assert_eq!(
            changed(&effects),
            Some(vec!["z".to_string(), "a".to_string(), "m".to_string()])
        );
    }
}

//! Typed configuration for the tag input.
//!
//! The historical tag-input revisions (plain separator list, regex-parsing
//! list, horizontal-scroll variant, max-tag-capped variant) are all
//! configuration points of one component; this struct is that surface.

use crate::collection::TextMode;
use crate::error::Result;
use crate::layout::{Axis, HeightPolicy, LayoutOptions, Sizing};
use crate::parse::{ParseRule, SeparatorSet};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Construction-time options for a tag input.
///
/// Defaults:
///
/// | option            | default                              |
/// |-------------------|--------------------------------------|
/// | `separators`      | `,` space `;` newline                |
/// | `pattern`         | none (whole-text separator mode)     |
/// | `parse_on_blur`   | `false`                              |
/// | `max_tags`        | unlimited                            |
/// | `editable`        | `true`                               |
/// | `text_mode`       | `Managed`                            |
/// | `layout`          | vertical, content-measured, 90/75    |
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagInputConfig {
    /// Characters that trigger tag extraction when typed last.
    pub separators: SeparatorSet,
    /// Optional tag-extraction pattern; when set, every non-overlapping
    /// match in the pending text becomes a candidate tag.
    pub pattern: Option<String>,
    /// Treat losing focus as an implicit submit.
    pub parse_on_blur: bool,
    /// Stop accepting tags (and rendering the input field) at this count.
    pub max_tags: Option<usize>,
    /// When false, removal and input are disabled.
    pub editable: bool,
    /// Who owns the pending text buffer.
    pub text_mode: TextMode,
    /// Adaptive sizing options.
    pub layout: LayoutOptions,
}

impl Default for TagInputConfig {
    fn default() -> Self {
        Self {
            separators: SeparatorSet::default(),
            pattern: None,
            parse_on_blur: false,
            max_tags: None,
            editable: true,
            text_mode: TextMode::default(),
            layout: LayoutOptions::default(),
        }
    }
}

impl TagInputConfig {
    /// A configuration scaled for terminal cells.
    pub fn terminal() -> Self {
        Self {
            layout: LayoutOptions {
                default_input_width: 12.0,
                height_policy: HeightPolicy::ContentMeasured { max_height: 4.0 },
                sizing: Sizing::cells(),
                ..LayoutOptions::default()
            },
            ..Self::default()
        }
    }

    /// Override the separator set.
    pub fn with_separators(mut self, chars: &[char]) -> Self {
        self.separators = SeparatorSet::new(chars);
        self
    }

    /// Use regex extraction with this pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Treat blur as an implicit submit.
    pub fn with_parse_on_blur(mut self, parse_on_blur: bool) -> Self {
        self.parse_on_blur = parse_on_blur;
        self
    }

    /// Cap the number of tags.
    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = Some(max_tags);
        self
    }

    /// Disable removal and input.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Select the pending-text ownership mode.
    pub fn with_text_mode(mut self, text_mode: TextMode) -> Self {
        self.text_mode = text_mode;
        self
    }

    /// Select the scroll axis.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.layout.axis = axis;
        self
    }

    /// Select the height growth policy.
    pub fn with_height_policy(mut self, policy: HeightPolicy) -> Self {
        self.layout.height_policy = policy;
        self
    }

    /// Disable automatic scroll-to-end/bottom.
    pub fn with_no_auto_scroll(mut self, no_auto_scroll: bool) -> Self {
        self.layout.no_auto_scroll = no_auto_scroll;
        self
    }

    /// Override the empty-state input width.
    pub fn with_default_input_width(mut self, width: f32) -> Self {
        self.layout.default_input_width = width;
        self
    }

    /// Override the spacing constants.
    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.layout.sizing = sizing;
        self
    }

    /// Compile the extraction rule from this configuration.
    pub fn parse_rule(&self) -> Result<ParseRule> {
        match &self.pattern {
            Some(pattern) => Ok(ParseRule::Regex(Regex::new(pattern)?)),
            None => Ok(ParseRule::Separators),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = TagInputConfig::default();
        assert!(config.pattern.is_none());
        assert!(!config.parse_on_blur);
        assert!(config.max_tags.is_none());
        assert!(config.editable);
        assert_eq!(config.text_mode, TextMode::Managed);
        assert_eq!(config.layout.default_input_width, 90.0);
        assert!(matches!(config.parse_rule().unwrap(), ParseRule::Separators));
    }

    #[test]
    fn test_terminal_preset_uses_cell_sizing() {
        let config = TagInputConfig::terminal();
        assert_eq!(config.layout.sizing, Sizing::cells());
        assert_eq!(config.layout.default_input_width, 12.0);
    }

    #[test]
    fn test_pattern_compiles_to_regex_rule() {
        let config = TagInputConfig::default().with_pattern(r"\w+");
        assert!(matches!(config.parse_rule().unwrap(), ParseRule::Regex(_)));
    }

    #[test]
    fn test_invalid_pattern_is_a_config_error() {
        let config = TagInputConfig::default().with_pattern("(");
        let err = config.parse_rule().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_builders() {
        let config = TagInputConfig::default()
            .with_separators(&[','])
            .with_parse_on_blur(true)
            .with_max_tags(3)
            .with_editable(false)
            .with_axis(Axis::Horizontal)
            .with_no_auto_scroll(true)
            .with_default_input_width(120.0);
        assert!(config.separators.contains(','));
        assert!(!config.separators.contains(' '));
        assert!(config.parse_on_blur);
        assert_eq!(config.max_tags, Some(3));
        assert!(!config.editable);
        assert_eq!(config.layout.axis, Axis::Horizontal);
        assert!(config.layout.no_auto_scroll);
        assert_eq!(config.layout.default_input_width, 120.0);
    }
}

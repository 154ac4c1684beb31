//! Adaptive layout controller.
//!
//! Keeps the trailing input field sized to the space left on the current
//! line, grows the wrapper by lines (or by measured content) until a cap is
//! hit, then switches to auto-scroll. All geometry is in abstract layout
//! units; rendering layers pick the unit scale through [`Sizing`].
//!
//! Nothing is computed before the first layout event: wrapper width and the
//! last chip's end position start out unmeasured and the controller stays
//! silent until they arrive.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Scroll direction of the surface hosting the chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Chips wrap onto new lines; overflow scrolls vertically.
    #[default]
    Vertical,
    /// Chips stay on one line; overflow scrolls horizontally.
    Horizontal,
}

/// How the wrapper height grows as chips accumulate.
///
/// Two policies exist across tag-input revisions with different switchover
/// triggers; both are supported and selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HeightPolicy {
    /// Count wrapped lines up to a cap; past the cap, overflow scrolls.
    LineCount {
        /// Maximum number of lines before growth stops.
        number_of_lines: u16,
    },
    /// Height follows measured content, clamped to a maximum; content
    /// growing past the viewport scrolls. Every height change is reported
    /// through [`LayoutEffect::HeightChanged`].
    ContentMeasured {
        /// Maximum wrapper height before scrolling takes over.
        max_height: f32,
    },
}

/// Fixed spacing constants used by the width and height computations.
///
/// Defaults are the classic mobile-density values; terminal renderers use
/// [`Sizing::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sizing {
    /// Below this much remaining space, the input wraps to a full line.
    pub space_threshold: f32,
    /// Margin reserved at the trailing edge of the input field.
    pub end_margin: f32,
    /// Horizontal margin after each chip.
    pub chip_margin: f32,
    /// Gutter between the last chip and the input field.
    pub gutter: f32,
    /// Height added per wrapped line.
    pub line_height: f32,
    /// Height of a single-line wrapper.
    pub base_height: f32,
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            space_threshold: 100.0,
            end_margin: 10.0,
            chip_margin: 3.0,
            gutter: 10.0,
            line_height: 40.0,
            base_height: 36.0,
        }
    }
}

impl Sizing {
    /// Spacing scaled to terminal cells (one unit per cell, one row per
    /// line).
    pub fn cells() -> Self {
        Self {
            space_threshold: 16.0,
            end_margin: 1.0,
            chip_margin: 1.0,
            gutter: 1.0,
            line_height: 1.0,
            base_height: 1.0,
        }
    }
}

/// Width of the trailing input field.
///
/// - empty pending text: the configured default width, so the placeholder
///   keeps a stable compact footprint;
/// - enough space left on the line: the remaining space minus the trailing
///   margin;
/// - otherwise: the full wrapper width, which visually wraps the field onto
///   a new line.
pub fn input_width(
    pending_text: &str,
    space_left: f32,
    default_width: f32,
    wrapper_width: f32,
    sizing: &Sizing,
) -> f32 {
    if pending_text.is_empty() {
        default_width
    } else if space_left >= sizing.space_threshold {
        space_left - sizing.end_margin
    } else {
        wrapper_width
    }
}

/// Geometry effect emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEffect {
    /// The trailing input field should take this width.
    InputWidth(f32),
    /// The wrapper should take this height.
    WrapperHeight(f32),
    /// Notify the embedding surface that the computed height changed.
    HeightChanged(f32),
    /// Scroll the surface to the bottom (vertical overflow).
    ScrollToBottom,
    /// Scroll the surface to the end (horizontal overflow).
    ScrollToEnd,
}

/// Layout options for the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Input width used while the pending text is empty.
    pub default_input_width: f32,
    /// Height growth policy.
    pub height_policy: HeightPolicy,
    /// Scroll direction.
    pub axis: Axis,
    /// Suppress all automatic scrolling.
    pub no_auto_scroll: bool,
    /// Spacing constants.
    pub sizing: Sizing,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            default_input_width: 90.0,
            height_policy: HeightPolicy::ContentMeasured { max_height: 75.0 },
            axis: Axis::Vertical,
            no_auto_scroll: false,
            sizing: Sizing::default(),
        }
    }
}

/// Tracks measured geometry and derives input width, wrapper height, and
/// scroll requests.
///
/// Scroll requests are deferred: they are queued when an event fires and
/// only surface from [`LayoutController::on_layout_committed`], after the
/// triggering layout has settled. After [`LayoutController::detach`] the
/// queue drains to nothing.
#[derive(Debug, Clone)]
pub struct LayoutController {
    opts: LayoutOptions,
    wrapper_width: Option<f32>,
    last_chip_end: Option<f32>,
    content_height: f32,
    viewport_height: f32,
    lines: u16,
    tag_count: usize,
    pending_empty: bool,
    input_width: Option<f32>,
    wrapper_height: Option<f32>,
    deferred: Vec<LayoutEffect>,
    detached: bool,
}

impl LayoutController {
    /// Create a controller in the unmeasured state.
    pub fn new(opts: LayoutOptions) -> Self {
        Self {
            opts,
            wrapper_width: None,
            last_chip_end: None,
            content_height: 0.0,
            viewport_height: 0.0,
            lines: 1,
            tag_count: 0,
            pending_empty: true,
            input_width: None,
            wrapper_height: None,
            deferred: Vec::new(),
            detached: false,
        }
    }

    /// The computed input width, if the wrapper has been measured.
    pub fn input_width(&self) -> Option<f32> {
        self.input_width
    }

    /// The computed wrapper height, if known.
    pub fn wrapper_height(&self) -> Option<f32> {
        self.wrapper_height
    }

    /// Current line count (line-counting policy).
    pub fn lines(&self) -> u16 {
        self.lines
    }

    /// The wrapper was laid out (or resized) to this width.
    pub fn on_wrapper_resize(&mut self, width: f32) -> Vec<LayoutEffect> {
        self.wrapper_width = Some(width);
        // Before any chip is measured, recompute gives the input the whole
        // line.
        self.recompute(false)
    }

    /// The currently-last chip reported its measured trailing edge.
    ///
    /// Only the last chip reports; a chip that newly becomes last after a
    /// removal reports on its next render. Only a *moved* trailing edge is a
    /// growth trigger; re-reporting the same measurement on an identical
    /// re-render never bumps the line count.
    pub fn on_last_chip_measured(&mut self, end_offset: f32) -> Vec<LayoutEffect> {
        let moved = self.last_chip_end != Some(end_offset);
        self.last_chip_end = Some(end_offset);
        self.recompute(moved)
    }

    /// The tag sequence length changed.
    pub fn on_tag_count_changed(&mut self, count: usize) -> Vec<LayoutEffect> {
        self.tag_count = count;
        if count == 0 {
            self.last_chip_end = None;
            self.lines = 1;
        }
        self.recompute(false)
    }

    /// The scrollable content was measured at this height.
    pub fn on_content_size(&mut self, height: f32) -> Vec<LayoutEffect> {
        let grew = height > self.content_height;
        self.content_height = height;

        let effects = self.recompute(false);
        if grew && self.content_height > self.viewport_height && self.viewport_height > 0.0 {
            self.request_scroll();
        }
        effects
    }

    /// The visible viewport was laid out at this height.
    pub fn on_viewport_resize(&mut self, height: f32) -> Vec<LayoutEffect> {
        self.viewport_height = height;
        self.recompute(false)
    }

    /// The pending text changed; only emptiness matters for sizing.
    pub fn on_pending_text(&mut self, empty: bool) -> Vec<LayoutEffect> {
        self.pending_empty = empty;
        self.recompute(false)
    }

    /// The host finished a layout pass. Drains work deferred by earlier
    /// events (scroll requests), preserving the "measure after commit"
    /// ordering. No-op after [`LayoutController::detach`].
    pub fn on_layout_committed(&mut self) -> Vec<LayoutEffect> {
        if self.detached {
            self.deferred.clear();
            return Vec::new();
        }
        std::mem::take(&mut self.deferred)
    }

    /// A collection operation asked to reveal the end of the content
    /// (backspace pop in scrolling variants). Goes through the same deferred
    /// queue as every other scroll request, so `no_auto_scroll` and
    /// [`LayoutController::detach`] apply.
    pub fn request_scroll_to_end(&mut self) {
        self.request_scroll();
    }

    /// Mark the component as torn down; queued deferred work is dropped.
    pub fn detach(&mut self) {
        self.detached = true;
        self.deferred.clear();
    }

    fn request_scroll(&mut self) {
        if self.opts.no_auto_scroll || self.detached {
            return;
        }
        let effect = match self.opts.axis {
            Axis::Vertical => LayoutEffect::ScrollToBottom,
            Axis::Horizontal => LayoutEffect::ScrollToEnd,
        };
        if !self.deferred.contains(&effect) {
            self.deferred.push(effect);
        }
    }

    /// Recompute input width and wrapper height from the current geometry.
    ///
    /// `may_grow_lines` is true only for the chip-measurement trigger; other
    /// triggers must not bump the line count.
    fn recompute(&mut self, may_grow_lines: bool) -> Vec<LayoutEffect> {
        let Some(wrapper) = self.wrapper_width else {
            return Vec::new();
        };
        let sizing = self.opts.sizing;
        let mut effects = Vec::new();

        let raw_width = match (self.tag_count, self.last_chip_end) {
            (0, _) | (_, None) => wrapper,
            (_, Some(end)) => {
                let space_left = wrapper - end - sizing.chip_margin - sizing.gutter;

                if space_left < sizing.space_threshold && may_grow_lines {
                    if let HeightPolicy::LineCount { number_of_lines } = self.opts.height_policy {
                        if self.lines < number_of_lines {
                            self.lines += 1;
                        } else {
                            self.request_scroll();
                        }
                    }
                }

                let pending = if self.pending_empty { "" } else { "x" };
                input_width(
                    pending,
                    space_left,
                    self.opts.default_input_width,
                    wrapper,
                    &sizing,
                )
            }
        };

        // Never narrower than the default, never wider than the wrapper.
        let width = raw_width.clamp(self.opts.default_input_width.min(wrapper), wrapper);
        if self.input_width != Some(width) {
            self.input_width = Some(width);
            effects.push(LayoutEffect::InputWidth(width));
        }

        let height = match self.opts.height_policy {
            HeightPolicy::LineCount { .. } => {
                f32::from(self.lines - 1) * sizing.line_height + sizing.base_height
            }
            HeightPolicy::ContentMeasured { max_height } => {
                let content = self.content_height.max(sizing.base_height);
                content.min(max_height)
            }
        };
        if self.wrapper_height != Some(height) {
            self.wrapper_height = Some(height);
            trace!(height, "wrapper height changed");
            effects.push(LayoutEffect::WrapperHeight(height));
            if matches!(self.opts.height_policy, HeightPolicy::ContentMeasured { .. }) {
                effects.push(LayoutEffect::HeightChanged(height));
            }
        }

        effects
    }
}

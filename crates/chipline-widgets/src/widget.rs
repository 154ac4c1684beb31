//! The tag input widget: a wrapping (or horizontally scrolling) row of
//! removable chips followed by an editable text field.
//!
//! The widget owns the parsing collection and the layout controller from
//! `chipline-core` and drives them from the render/key cycle: each frame it
//! places chips, feeds the measured geometry back into the controller, sizes
//! the trailing input from the controller's answer, and applies deferred
//! scroll effects after the frame commits.

use chipline_core::{
    Axis, Effect, LayoutController, LayoutEffect, Result, TagCollection, TagInputConfig,
    TagValue,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    Frame,
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::chip::{display_width, Chip, ChipGeometry};
use crate::theme::Theme;

/// Action returned from tag input key handling.
#[derive(Debug, Clone, PartialEq)]
pub enum TagInputAction<T> {
    /// No action taken.
    None,
    /// Key was handled, tag sequence unchanged.
    Handled,
    /// The tag sequence should become this value. The owner commits it back
    /// through [`TagInputWidget::set_value`].
    Changed(Vec<T>),
}

/// Where a chip or the input field landed this frame.
#[derive(Debug, Clone, Copy)]
struct Placement {
    x: u16,
    row: u16,
    width: u16,
}

/// The tag input widget.
pub struct TagInputWidget<T: TagValue> {
    collection: TagCollection<T>,
    layout: LayoutController,
    axis: Axis,
    editable: bool,
    chip_margin: u16,
    gutter: u16,
    placeholder: String,
    focused: bool,
    attached: bool,
    scroll_row: u16,
    scroll_col: u16,
    content_rows: u16,
    content_cols: u16,
    geometry: Vec<ChipGeometry>,
    height_changed: Option<u16>,
}

impl<T: TagValue> TagInputWidget<T> {
    /// Create a widget from a configuration.
    ///
    /// Fails only if the configured extraction pattern does not compile.
    pub fn new(config: TagInputConfig) -> Result<Self> {
        let collection = TagCollection::new(&config)?;
        let sizing = config.layout.sizing;
        Ok(Self {
            collection,
            layout: LayoutController::new(config.layout.clone()),
            axis: config.layout.axis,
            editable: config.editable,
            chip_margin: sizing.chip_margin.round() as u16,
            gutter: sizing.gutter.round() as u16,
            placeholder: "Start typing".to_string(),
            focused: false,
            attached: false,
            scroll_row: 0,
            scroll_col: 0,
            content_rows: 0,
            content_cols: 0,
            geometry: Vec::new(),
            height_changed: None,
        })
    }

    /// Override the placeholder shown in the empty input field.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Commit the caller-owned tag sequence.
    pub fn set_value(&mut self, value: Vec<T>) {
        let count = value.len();
        self.collection.set_value(value);
        let effects = self.layout.on_tag_count_changed(count);
        self.absorb(effects);
    }

    /// The mirrored tag sequence.
    pub fn value(&self) -> &[T] {
        self.collection.value()
    }

    /// The pending (not yet committed) text.
    pub fn pending_text(&self) -> &str {
        self.collection.pending_text()
    }

    /// Push the caller-owned pending text in (controlled-text mode).
    pub fn set_pending_text(&mut self, text: &str) {
        self.collection.set_pending_text(text);
        let empty = text.is_empty();
        let effects = self.layout.on_pending_text(empty);
        self.absorb(effects);
    }

    /// Whether the widget has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give the widget keyboard focus. Silently no-ops before the first
    /// render, when there is nothing to focus yet.
    pub fn focus(&mut self) {
        if !self.attached {
            debug!("focus() before first render ignored");
            return;
        }
        self.focused = true;
    }

    /// Drop keyboard focus. Runs the blur parse when configured.
    pub fn blur(&mut self) -> TagInputAction<T> {
        self.focused = false;
        let effects = self.collection.on_blur();
        self.apply(effects)
    }

    /// Force a parse of the pending text now.
    pub fn parse_tags(&mut self) -> TagInputAction<T> {
        let effects = self.collection.parse();
        self.apply(effects)
    }

    /// Programmatically append a tag, bypassing parsing.
    pub fn add_custom_tag(&mut self, tag: T) -> TagInputAction<T> {
        let effects = self.collection.add_custom_tag(tag);
        self.apply(effects)
    }

    /// Remove the tag at `index` (chip dismiss).
    pub fn remove_at(&mut self, index: usize) -> TagInputAction<T> {
        if !self.editable {
            return TagInputAction::None;
        }
        let effects = self.collection.remove_at(index);
        self.apply(effects)
    }

    /// Measured geometry of the chips from the last render, by chip index.
    pub fn chip_geometry(&self) -> &[ChipGeometry] {
        &self.geometry
    }

    /// The height the widget wants from the embedding surface, in rows.
    pub fn desired_height(&self) -> u16 {
        self.layout
            .wrapper_height()
            .map(|h| h.round().max(1.0) as u16)
            .unwrap_or(1)
    }

    /// Take the pending height-change notification, if any.
    pub fn take_height_change(&mut self) -> Option<u16> {
        self.height_changed.take()
    }

    /// Mark the widget as torn down; deferred layout work becomes a no-op.
    pub fn detach(&mut self) {
        self.layout.detach();
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> TagInputAction<T> {
        if !self.focused || !self.editable {
            return TagInputAction::None;
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.collection.is_full() {
                    return TagInputAction::Handled;
                }
                let mut text = self.collection.pending_text().to_string();
                text.push(c);
                let effects = self.collection.on_text_changed(&text);
                match self.apply(effects) {
                    TagInputAction::None => TagInputAction::Handled,
                    other => other,
                }
            }
            KeyCode::Backspace => {
                if self.collection.pending_text().is_empty() {
                    let effects = self.collection.on_backspace();
                    self.apply(effects)
                } else {
                    let mut text = self.collection.pending_text().to_string();
                    text.pop();
                    let effects = self.collection.on_text_changed(&text);
                    let action = self.apply(effects);
                    match action {
                        TagInputAction::None => TagInputAction::Handled,
                        other => other,
                    }
                }
            }
            KeyCode::Enter => {
                let effects = self.collection.on_submit();
                match self.apply(effects) {
                    TagInputAction::None => TagInputAction::Handled,
                    other => other,
                }
            }
            KeyCode::Esc => {
                self.blur();
                TagInputAction::Handled
            }
            _ => TagInputAction::None,
        }
    }

    /// Render into `area` and run the post-commit layout step.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.attached = true;

        let effects = self.layout.on_wrapper_resize(f32::from(area.width));
        self.absorb(effects);
        // Extents are measured along the scroll axis.
        let viewport = match self.axis {
            Axis::Vertical => area.height,
            Axis::Horizontal => area.width,
        };
        let effects = self.layout.on_viewport_resize(f32::from(viewport));
        self.absorb(effects);

        let placements = self.place_chips(area.width);
        self.geometry = placements
            .iter()
            .map(|p| ChipGeometry {
                offset: p.x,
                width: p.width,
            })
            .collect();
        if let Some(last) = self.geometry.last() {
            let effects = self.layout.on_last_chip_measured(f32::from(last.end()));
            self.absorb(effects);
        }

        let input = self.place_input(area.width, &placements);

        // Content extent along the scroll axis, fed back for the scroll
        // policy.
        let rows = input
            .map(|p| p.row + 1)
            .or_else(|| placements.last().map(|p| p.row + 1))
            .unwrap_or(1);
        self.content_rows = rows;
        self.content_cols = input
            .map(|p| p.x + p.width)
            .or_else(|| placements.last().map(|p| p.x + p.width))
            .unwrap_or(0);
        let content = match self.axis {
            Axis::Vertical => f32::from(rows),
            Axis::Horizontal => f32::from(self.content_cols),
        };
        let effects = self.layout.on_content_size(content);
        self.absorb(effects);

        self.draw(frame, area, theme, &placements, input);
        self.commit(area);
    }

    /// Place chips into lines (vertical) or one scrolling line (horizontal).
    fn place_chips(&self, width: u16) -> Vec<Placement> {
        let mut out = Vec::with_capacity(self.collection.len());
        let mut x: u16 = 0;
        let mut row: u16 = 0;
        for tag in self.collection.value() {
            let w = display_width(&tag.label()).min(width.max(1));
            if self.axis == Axis::Vertical && x > 0 && x + w > width {
                row += 1;
                x = 0;
            }
            out.push(Placement { x, row, width: w });
            x += w + self.chip_margin;
        }
        out
    }

    /// Place the trailing input field after the chips, wrapping to a new
    /// line when the controller handed it the full wrapper width.
    fn place_input(&self, width: u16, placements: &[Placement]) -> Option<Placement> {
        if self.collection.is_full() {
            return None;
        }
        let iw = self
            .layout
            .input_width()
            .map(|w| (w.round() as u16).clamp(1, width))
            .unwrap_or(width);

        let Some(last) = placements.last() else {
            return Some(Placement {
                x: 0,
                row: 0,
                width: iw,
            });
        };

        let x = last.x + last.width + self.chip_margin + self.gutter;
        if self.axis == Axis::Horizontal {
            return Some(Placement {
                x,
                row: 0,
                width: iw,
            });
        }
        if x + iw > width {
            Some(Placement {
                x: 0,
                row: last.row + 1,
                width: iw,
            })
        } else {
            Some(Placement {
                x,
                row: last.row,
                width: iw,
            })
        }
    }

    fn draw(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        placements: &[Placement],
        input: Option<Placement>,
    ) {
        for (tag, placement) in self.collection.value().iter().zip(placements) {
            if let Some(rect) = self.screen_rect(area, *placement) {
                let label = tag.label();
                frame.render_widget(Chip::new(label.as_ref(), theme), rect);
            }
        }

        let Some(input) = input else { return };
        let Some(rect) = self.screen_rect(area, input) else {
            return;
        };

        let pending = self.collection.pending_text();
        let (text, style) = if pending.is_empty() {
            (self.placeholder.as_str(), theme.placeholder_style())
        } else {
            (pending, theme.input_style())
        };
        frame
            .buffer_mut()
            .set_stringn(rect.x, rect.y, text, rect.width as usize, style);

        if self.focused && self.editable {
            let cursor_x = rect
                .x
                .saturating_add(pending.width() as u16)
                .min(rect.x + rect.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(cursor_x, rect.y));
        }
    }

    /// Map a content placement to an on-screen rect, applying scroll and
    /// clipping; `None` when fully scrolled out of view.
    fn screen_rect(&self, area: Rect, p: Placement) -> Option<Rect> {
        match self.axis {
            Axis::Vertical => {
                if p.row < self.scroll_row || p.row - self.scroll_row >= area.height {
                    return None;
                }
                let y = area.y + (p.row - self.scroll_row);
                let x = area.x + p.x.min(area.width.saturating_sub(1));
                let w = p.width.min(area.width.saturating_sub(p.x));
                if w == 0 {
                    return None;
                }
                Some(Rect::new(x, y, w, 1))
            }
            Axis::Horizontal => {
                let end = p.x + p.width;
                if end <= self.scroll_col || p.x >= self.scroll_col + area.width {
                    return None;
                }
                // Clip the leading part if the chip straddles the left edge.
                let start = p.x.max(self.scroll_col);
                let x = area.x + (start - self.scroll_col);
                let w = (end - start).min(area.width - (start - self.scroll_col));
                Some(Rect::new(x, area.y, w, 1))
            }
        }
    }

    /// Post-commit step: drain deferred layout work and apply scrolls.
    fn commit(&mut self, area: Rect) {
        for effect in self.layout.on_layout_committed() {
            match effect {
                LayoutEffect::ScrollToBottom => {
                    self.scroll_row = self.content_rows.saturating_sub(area.height);
                }
                LayoutEffect::ScrollToEnd => {
                    self.scroll_col = self.content_cols.saturating_sub(area.width);
                }
                LayoutEffect::InputWidth(_)
                | LayoutEffect::WrapperHeight(_)
                | LayoutEffect::HeightChanged(_) => {}
            }
        }
        // Clamp scrolls when content shrank.
        self.scroll_row = self
            .scroll_row
            .min(self.content_rows.saturating_sub(area.height));
        self.scroll_col = self
            .scroll_col
            .min(self.content_cols.saturating_sub(area.width));
    }

    /// Fold collection effects into widget state and surface the sequence
    /// change, if any.
    fn apply(&mut self, effects: Vec<Effect<T>>) -> TagInputAction<T> {
        if effects.is_empty() {
            return TagInputAction::None;
        }
        let mut changed = None;
        for effect in effects {
            match effect {
                Effect::Change(next) => {
                    let layout_effects = self.layout.on_tag_count_changed(next.len());
                    self.absorb(layout_effects);
                    changed = Some(next);
                }
                Effect::ClearText => {}
                Effect::RequestFocus => {
                    if self.attached {
                        self.focused = true;
                    }
                }
                Effect::RequestScrollToEnd => {
                    if self.axis == Axis::Horizontal {
                        self.layout.request_scroll_to_end();
                    }
                }
            }
        }
        let empty = self.collection.pending_text().is_empty();
        let layout_effects = self.layout.on_pending_text(empty);
        self.absorb(layout_effects);

        match changed {
            Some(next) => TagInputAction::Changed(next),
            None => TagInputAction::Handled,
        }
    }

    /// Stash immediate layout effects that the embedding surface observes.
    fn absorb(&mut self, effects: Vec<LayoutEffect>) {
        for effect in effects {
            if let LayoutEffect::HeightChanged(h) = effect {
                self.height_changed = Some(h.round().max(1.0) as u16);
            }
        }
    }
}

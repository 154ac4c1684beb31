//! The chip leaf: one tag rendered with a dismiss affordance.
//!
//! Chips are stateless per render. The parent rebuilds a geometry map every
//! frame, indexed by chip index, and forwards the last chip's trailing edge
//! into the layout controller; a chip that newly becomes last after a
//! removal is therefore picked up on the same frame.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Dismiss affordance glyph.
const DISMISS: char = '\u{00d7}'; // ×

/// Measured footprint of one rendered chip: offset within its line plus
/// width, both in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipGeometry {
    /// Horizontal offset of the chip within its line.
    pub offset: u16,
    /// Rendered width of the chip.
    pub width: u16,
}

impl ChipGeometry {
    /// Trailing edge of the chip within its line.
    pub fn end(&self) -> u16 {
        self.offset + self.width
    }
}

/// A single tag chip: ` label × `.
#[derive(Debug, Clone)]
pub struct Chip<'a> {
    label: &'a str,
    style: ratatui::style::Style,
}

impl<'a> Chip<'a> {
    /// Create a chip for a tag label.
    pub fn new(label: &'a str, theme: &Theme) -> Self {
        Self {
            label,
            style: theme.chip_style(),
        }
    }

    /// Rendered width of this chip in cells.
    pub fn width(&self) -> u16 {
        display_width(self.label)
    }
}

/// Rendered width of a chip with this label: the label plus padding and the
/// dismiss glyph.
pub fn display_width(label: &str) -> u16 {
    // " label × " -> label + 2 pad + glyph + separator space
    label.width() as u16 + 4
}

impl Widget for Chip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let text = format!(" {} {DISMISS} ", self.label);
        buf.set_stringn(area.x, area.y, &text, area.width as usize, self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("a"), 5);
        assert_eq!(display_width("hello"), 9);
        // Wide characters count double.
        assert_eq!(display_width("日本"), 8);
    }

    #[test]
    fn test_chip_width_matches_display_width() {
        let theme = Theme::default();
        let chip = Chip::new("tag", &theme);
        assert_eq!(chip.width(), display_width("tag"));
    }

    #[test]
    fn test_geometry_end() {
        let geo = ChipGeometry {
            offset: 10,
            width: 7,
        };
        assert_eq!(geo.end(), 17);
    }

    #[test]
    fn test_chip_renders_label_and_dismiss() {
        let theme = Theme::default();
        let chip = Chip::new("ab", &theme);
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        chip.render(area, &mut buf);

        let row: String = (0..6)
            .map(|x| buf[(x, 0)].symbol().chars().next().unwrap())
            .collect();
        assert_eq!(row, " ab × ");
    }

    #[test]
    fn test_chip_truncates_to_area() {
        let theme = Theme::default();
        let chip = Chip::new("longlabel", &theme);
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        chip.render(area, &mut buf);
        // Nothing written past the area.
        assert_eq!(buf[(3, 0)].symbol(), "n");
    }
}

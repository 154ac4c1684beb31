//! Ratatui rendering layer for the chipline tag input.
//!
//! This crate provides the terminal widgets over `chipline-core`:
//! - Chip: one tag rendered with a dismiss affordance
//! - TagInputWidget: the full chip row + trailing input field
//! - Theme: colors for chips and input

pub mod chip;
pub mod theme;
pub mod widget;

// Re-export commonly used types
pub use chip::{Chip, ChipGeometry};
pub use theme::Theme;
pub use widget::{TagInputAction, TagInputWidget};

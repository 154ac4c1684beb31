//! Tag value abstraction.
//!
//! The widget never owns the canonical tag list; it mirrors a caller-owned
//! sequence of values of any type that can round-trip through text. Plain
//! `String` tags work out of the box; richer types (an email address, a label
//! with an id) implement [`TagValue`] themselves.

use std::borrow::Cow;

/// A value that can be stored in the tag sequence.
///
/// `label` is the display side (what the chip renders); `from_input` is the
/// parsing side (how a token extracted from the pending text becomes a
/// value). `from_input` may reject a token by returning `None`, in which
/// case the token is silently dropped from the parse result.
pub trait TagValue: Clone + PartialEq {
    /// Display label for the chip.
    fn label(&self) -> Cow<'_, str>;

    /// Build a value from a parsed token.
    fn from_input(text: &str) -> Option<Self>;
}

impl TagValue for String {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn from_input(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

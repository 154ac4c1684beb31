//! Core state machine for the chipline tag input.
//!
//! This crate is UI-framework agnostic. It provides:
//! - Tag value abstraction and text-to-tag parsing
//! - The tag collection (controlled-input mutation model)
//! - The adaptive layout controller (input width, line growth, auto-scroll)
//! - Typed configuration with documented defaults
//!
//! Rendering layers (see `chipline-widgets`) feed measured geometry into the
//! [`LayoutController`] and apply the effects it emits.

pub mod collection;
pub mod config;
pub mod error;
pub mod layout;
pub mod parse;
pub mod tag;

pub use collection::{Effect, TagCollection, TextMode};
pub use config::TagInputConfig;
pub use error::{Error, ErrorKind, Result};
pub use layout::{
    input_width, Axis, HeightPolicy, LayoutController, LayoutEffect, LayoutOptions, Sizing,
};
pub use parse::{ParseRule, SeparatorSet, DEFAULT_SEPARATORS};
pub use tag::TagValue;

//! Text-handling helpers shared across extractors.

pub mod utf8_validation;

pub use utf8_validation::{from_utf8, is_valid_utf8, string_from_utf8};

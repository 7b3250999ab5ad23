//! Plain-text alternative generation for HTML email.
//!
//! Conversion is pattern based, not a DOM walk: links are inlined as
//! `TEXT (URL)`, comments and invisible blocks are dropped, remaining tags are
//! stripped, and runs of whitespace collapse to their first character.

mod downgrade;
mod sanitizer;

pub use downgrade::{to_plain_text, PlainTextDowngrader};
pub use sanitizer::{BasicSanitizer, Sanitizer};

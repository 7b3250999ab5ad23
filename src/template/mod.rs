//! Welcome message template rendering.
//!
//! This module provides:
//! - Reserved values (`{pass}`, `{adminUrl}`, `{fromEmail}`) supplied by the caller
//! - Record lookup for every other `{field}` placeholder
//! - A single-pass substitution engine for HTML message bodies
//!
//! # Example
//!
//! ```ignore
//! let reserved = ReservedValues::new("s3cr3t", "https://example.com/admin/", "hello@example.com");
//! let mut record = UserRecord::new();
//! record.insert("first_name", "Alice");
//!
//! let html = render("<p>Hi {first_name}, your password is {pass}</p>", &reserved, &record);
//! ```

mod substitution;
mod types;

pub use substitution::{placeholders, render, MISSING_VALUE};
pub use types::{RecordLookup, ReservedValues, UserRecord};

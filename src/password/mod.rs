//! Temporary password generation for new accounts.
//!
//! Passwords draw from ambiguity-free alphabets (no `i`, `l`, `1`, `o`, `0`)
//! so they are easy to read out or type, contain at least one character of
//! every enabled class, and can optionally be grouped with dashes.

mod charset;
mod generator;

pub use charset::{
    CharacterSet, CharacterSets, PasswordRequirement, DIGITS, LOWERCASE, SYMBOLS, UPPERCASE,
};
pub use generator::{
    generate, generate_with_rng, PasswordError, PasswordPolicy, PasswordResult, PasswordSpec,
    GROUP_SEPARATOR, MIN_GENERATED_LENGTH,
};

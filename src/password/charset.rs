//! Ambiguity-free character sets

use serde::{Deserialize, Serialize};

/// Lowercase letters without `i`, `l`, `o`
pub const LOWERCASE: &str = "abcdefghjkmnpqrstuvwxyz";
/// Uppercase letters without `I`, `L`, `O`
pub const UPPERCASE: &str = "ABCDEFGHJKMNPQRSTUVWXYZ";
/// Digits without `0`, `1`
pub const DIGITS: &str = "23456789";
pub const SYMBOLS: &str = "!@#$%&*?";

/// A single character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharacterSet {
    /// All classes in coverage order
    pub const ALL: [CharacterSet; 4] = [Self::Lower, Self::Upper, Self::Digit, Self::Symbol];

    pub fn alphabet(&self) -> &'static str {
        match self {
            Self::Lower => LOWERCASE,
            Self::Upper => UPPERCASE,
            Self::Digit => DIGITS,
            Self::Symbol => SYMBOLS,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.alphabet().contains(c)
    }
}

/// Requirement names a password field can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordRequirement {
    Letter,
    Lower,
    Upper,
    Digit,
    Other,
}

/// Selection of enabled character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSets {
    #[serde(default)]
    pub lower: bool,
    #[serde(default)]
    pub upper: bool,
    #[serde(default)]
    pub digit: bool,
    #[serde(default)]
    pub symbol: bool,
}

impl Default for CharacterSets {
    fn default() -> Self {
        Self::all()
    }
}

impl CharacterSets {
    pub fn all() -> Self {
        Self {
            lower: true,
            upper: true,
            digit: true,
            symbol: true,
        }
    }

    pub fn none() -> Self {
        Self {
            lower: false,
            upper: false,
            digit: false,
            symbol: false,
        }
    }

    /// Lowercase, uppercase and digits
    pub fn alphanumeric() -> Self {
        Self {
            symbol: false,
            ..Self::all()
        }
    }

    /// Sets for a password field with the given requirements.
    ///
    /// Letters and digits are always enabled; passwords without them are
    /// often rejected as too common. Symbols only when `other` is required.
    pub fn from_requirements(requirements: &[PasswordRequirement]) -> Self {
        Self {
            symbol: requirements.contains(&PasswordRequirement::Other),
            ..Self::alphanumeric()
        }
    }

    pub fn with(mut self, set: CharacterSet) -> Self {
        match set {
            CharacterSet::Lower => self.lower = true,
            CharacterSet::Upper => self.upper = true,
            CharacterSet::Digit => self.digit = true,
            CharacterSet::Symbol => self.symbol = true,
        }
        self
    }

    pub fn is_enabled(&self, set: CharacterSet) -> bool {
        match set {
            CharacterSet::Lower => self.lower,
            CharacterSet::Upper => self.upper,
            CharacterSet::Digit => self.digit,
            CharacterSet::Symbol => self.symbol,
        }
    }

    /// Enabled classes in coverage order
    pub fn enabled(&self) -> Vec<CharacterSet> {
        CharacterSet::ALL
            .into_iter()
            .filter(|set| self.is_enabled(*set))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.enabled().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMBIGUOUS: [char; 8] = ['i', 'l', 'o', '0', '1', 'I', 'L', 'O'];

    #[test]
    fn test_alphabets_exclude_ambiguous_characters() {
        for set in CharacterSet::ALL {
            for c in AMBIGUOUS {
                assert!(!set.contains(c), "{:?} contains {}", set, c);
            }
        }
    }

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(LOWERCASE.len(), 23);
        assert_eq!(UPPERCASE.len(), 23);
        assert_eq!(DIGITS.len(), 8);
        assert_eq!(SYMBOLS.len(), 8);
    }

    #[test]
    fn test_from_requirements() {
        let sets = CharacterSets::from_requirements(&[]);
        assert_eq!(sets, CharacterSets::alphanumeric());

        let sets = CharacterSets::from_requirements(&[
            PasswordRequirement::Letter,
            PasswordRequirement::Other,
        ]);
        assert_eq!(sets, CharacterSets::all());
    }

    #[test]
    fn test_enabled_order() {
        let sets = CharacterSets::none()
            .with(CharacterSet::Symbol)
            .with(CharacterSet::Lower);

        assert_eq!(sets.enabled(), vec![CharacterSet::Lower, CharacterSet::Symbol]);
        assert_eq!(sets.count(), 2);
        assert!(CharacterSets::none().is_empty());
    }
}

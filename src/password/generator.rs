//! Random password generation with guaranteed character-class coverage

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::charset::{CharacterSets, PasswordRequirement};

/// Lower bound applied to configured password lengths
pub const MIN_GENERATED_LENGTH: usize = 12;

/// Separator placed between groups when grouping is requested
pub const GROUP_SEPARATOR: char = '-';

/// Password generation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("No character set selected for password generation")]
    NoCharacterSetSelected,

    #[error("Invalid password length: {0}")]
    InvalidLength(usize),
}

/// Result type for password operations
pub type PasswordResult<T> = Result<T, PasswordError>;

/// What to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSpec {
    /// Number of characters before grouping
    pub length: usize,

    /// Re-chunk the result into dash separated groups
    #[serde(default)]
    pub grouped: bool,

    #[serde(default)]
    pub sets: CharacterSets,
}

impl PasswordSpec {
    pub fn new(length: usize, grouped: bool, sets: CharacterSets) -> Self {
        Self {
            length,
            grouped,
            sets,
        }
    }
}

/// Password field policy of the account store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default)]
    pub requirements: Vec<PasswordRequirement>,

    #[serde(default)]
    pub grouped: bool,
}

fn default_min_length() -> usize {
    MIN_GENERATED_LENGTH
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            requirements: vec![
                PasswordRequirement::Letter,
                PasswordRequirement::Digit,
            ],
            grouped: false,
        }
    }
}

impl PasswordPolicy {
    /// Generation spec for this policy. Length never drops below
    /// [`MIN_GENERATED_LENGTH`].
    pub fn spec(&self) -> PasswordSpec {
        PasswordSpec {
            length: self.min_length.max(MIN_GENERATED_LENGTH),
            grouped: self.grouped,
            sets: CharacterSets::from_requirements(&self.requirements),
        }
    }
}

/// Generate a password from the thread-local CSPRNG
pub fn generate(length: usize, grouped: bool, sets: CharacterSets) -> PasswordResult<String> {
    generate_with_rng(&PasswordSpec::new(length, grouped, sets), &mut rand::rng())
}

/// Generate a password from the given cryptographically secure generator.
///
/// One character is drawn from every enabled set, the rest uniformly from the
/// pooled alphabet, then the whole sequence is shuffled. When `length` is
/// smaller than the number of enabled sets the result holds one character per
/// set.
pub fn generate_with_rng<R>(spec: &PasswordSpec, rng: &mut R) -> PasswordResult<String>
where
    R: Rng + CryptoRng + ?Sized,
{
    let enabled = spec.sets.enabled();
    if enabled.is_empty() {
        return Err(PasswordError::NoCharacterSetSelected);
    }
    if spec.length == 0 {
        return Err(PasswordError::InvalidLength(spec.length));
    }

    let mut pool: Vec<char> = Vec::new();
    let mut password: Vec<char> = Vec::with_capacity(spec.length.max(enabled.len()));

    for set in &enabled {
        let alphabet: Vec<char> = set.alphabet().chars().collect();
        if let Some(c) = alphabet.choose(rng) {
            password.push(*c);
        }
        pool.extend(alphabet);
    }

    for _ in 0..spec.length.saturating_sub(enabled.len()) {
        if let Some(c) = pool.choose(rng) {
            password.push(*c);
        }
    }

    password.shuffle(rng);

    if spec.grouped {
        Ok(group(&password, group_size(spec.length)))
    } else {
        Ok(password.into_iter().collect())
    }
}

/// `floor(sqrt(length))`, at least 1
fn group_size(length: usize) -> usize {
    ((length as f64).sqrt().floor() as usize).max(1)
}

fn group(chars: &[char], size: usize) -> String {
    let mut out = String::with_capacity(chars.len() + chars.len() / size);
    for (i, chunk) in chars.chunks(size).enumerate() {
        if i > 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.extend(chunk);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::{CharacterSet, DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn contains_any(password: &str, alphabet: &str) -> bool {
        password.chars().any(|c| alphabet.contains(c))
    }

    #[test]
    fn test_coverage_all_sets() {
        for _ in 0..1000 {
            let password = generate(16, false, CharacterSets::all()).unwrap();

            assert_eq!(password.chars().count(), 16);
            assert!(contains_any(&password, LOWERCASE), "{}", password);
            assert!(contains_any(&password, UPPERCASE), "{}", password);
            assert!(contains_any(&password, DIGITS), "{}", password);
            assert!(contains_any(&password, SYMBOLS), "{}", password);
        }
    }

    #[test]
    fn test_never_contains_ambiguous_characters() {
        for _ in 0..1000 {
            let password = generate(24, false, CharacterSets::all()).unwrap();
            assert!(
                !password.chars().any(|c| "ilo01ILO".contains(c)),
                "{}",
                password
            );
        }
    }

    #[test]
    fn test_only_enabled_sets_used() {
        let sets = CharacterSets::none().with(CharacterSet::Digit);
        let password = generate(20, false, sets).unwrap();

        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|c| DIGITS.contains(c)));
    }

    #[test]
    fn test_grouping_nine() {
        let password = generate(9, true, CharacterSets::all()).unwrap();
        let groups: Vec<&str> = password.split('-').collect();

        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 3));
        assert_eq!(password.replace('-', "").len(), 9);
    }

    #[test]
    fn test_grouping_with_partial_group() {
        // floor(sqrt(12)) = 3
        let sets = CharacterSets::alphanumeric();
        let password = generate(12, true, sets).unwrap();
        let groups: Vec<&str> = password.split('-').collect();

        assert_eq!(groups.len(), 4);
        assert!(!password.ends_with('-'));

        // floor(sqrt(10)) = 3 -> 3-3-3-1
        let password = generate(10, true, sets).unwrap();
        let lens: Vec<usize> = password.split('-').map(str::len).collect();
        assert_eq!(lens, vec![3, 3, 3, 1]);
    }

    #[test]
    fn test_group_helper() {
        let chars: Vec<char> = "abcdefgh".chars().collect();
        assert_eq!(group(&chars, 3), "abc-def-gh");
        assert_eq!(group(&chars, 8), "abcdefgh");
    }

    #[test]
    fn test_length_shorter_than_set_count() {
        let password = generate(2, false, CharacterSets::all()).unwrap();
        assert_eq!(password.len(), 4);
    }

    #[test]
    fn test_no_sets_is_an_error() {
        assert_eq!(
            generate(12, false, CharacterSets::none()),
            Err(PasswordError::NoCharacterSetSelected)
        );
    }

    #[test]
    fn test_zero_length_is_an_error() {
        assert_eq!(
            generate(0, false, CharacterSets::all()),
            Err(PasswordError::InvalidLength(0))
        );
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let spec = PasswordSpec::new(16, false, CharacterSets::all());

        let a = generate_with_rng(&spec, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_with_rng(&spec, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_policy_spec() {
        let policy = PasswordPolicy {
            min_length: 6,
            requirements: vec![PasswordRequirement::Other],
            grouped: false,
        };
        let spec = policy.spec();
        assert_eq!(spec.length, MIN_GENERATED_LENGTH);
        assert_eq!(spec.sets, CharacterSets::all());

        let policy = PasswordPolicy {
            min_length: 20,
            ..PasswordPolicy::default()
        };
        let spec = policy.spec();
        assert_eq!(spec.length, 20);
        assert_eq!(spec.sets, CharacterSets::alphanumeric());
    }
}

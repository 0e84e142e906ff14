//! Seeded password generation over configurable character sets.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::stream::{HashAlgorithm, IntStream, KeyedStream};
use crate::{ConfigurationError, ConfigurationErrorRepr, Secret, DEFAULT_ALPHABET};

/// Options accepted by [`Generator::new`].
///
/// Every field has a default, so a stored policy document may omit any of
/// them: SHA-256, a single 62-character alphanumeric set, and sampling
/// with replacement.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Digest keying the integer stream.
    pub hash_alg: HashAlgorithm,
    /// Ordered character sets; the rotation visits them in this order.
    pub character_sets: Vec<String>,
    /// When set, each character instance may be drawn at most once per
    /// password.
    pub non_replacement: bool,
}

impl Default for GeneratorOptions {
    fn default() -> GeneratorOptions {
        GeneratorOptions {
            hash_alg: HashAlgorithm::default(),
            character_sets: vec![DEFAULT_ALPHABET.to_owned()],
            non_replacement: false,
        }
    }
}

/// Derives reproducible passwords from a secret and per-call seed material.
///
/// The secret and configuration are fixed at construction and never
/// mutated afterwards; each [`generate`](Generator::generate) call works on
/// its own stream and its own copy of the character sets, so a shared
/// `Generator` may serve concurrent calls.
pub struct Generator {
    secret: Secret,
    hash_alg: HashAlgorithm,
    character_sets: Vec<Vec<char>>,
    non_replacement: bool,
    /// Total character count across all sets; the output-length ceiling
    /// when sampling without replacement.
    max_length: usize,
}

impl Generator {
    /// Length used when callers have no preference.
    pub const DEFAULT_LENGTH: usize = 10;

    /// Validates `options` and builds a generator owning `secret`.
    ///
    /// Fails if no character sets are configured, or if any configured set
    /// is empty.
    pub fn new(secret: Secret, options: GeneratorOptions) -> Result<Generator, ConfigurationError> {
        if options.character_sets.is_empty() {
            return Err(ConfigurationErrorRepr::NoCharacterSets.into());
        }
        if options.character_sets.iter().any(|set| set.is_empty()) {
            return Err(ConfigurationErrorRepr::EmptyCharacterSet.into());
        }

        let character_sets: Vec<Vec<char>> = options
            .character_sets
            .iter()
            .map(|set| set.chars().collect())
            .collect();
        let max_length = character_sets.iter().map(Vec::len).sum();

        Ok(Generator {
            secret,
            hash_alg: options.hash_alg,
            character_sets,
            non_replacement: options.non_replacement,
            max_length,
        })
    }

    /// Derives the password for `seed`.
    ///
    /// The same secret, seed, length, and configuration always produce the
    /// same string. Positions are filled by rotating through the character
    /// sets and reducing one stream draw modulo the set length per
    /// position; the reduction carries a small bias whenever the draw
    /// range is not a multiple of the set length, which is accepted here
    /// in exchange for a stable mapping from draws to characters.
    ///
    /// `length` must be at least the number of configured sets, so that a
    /// full rotation can visit every set; without replacement it must also
    /// not exceed the total character count.
    pub fn generate(&self, seed: &[u8], length: usize) -> Result<String, ConfigurationError> {
        if length < self.character_sets.len() {
            return Err(ConfigurationErrorRepr::LengthBelowSetCount {
                required: self.character_sets.len(),
            }
            .into());
        }
        if self.non_replacement && length > self.max_length {
            return Err(ConfigurationErrorRepr::LengthExceedsPool {
                max: self.max_length,
            }
            .into());
        }

        let mut key = Vec::with_capacity(self.secret.as_bytes().len() + seed.len());
        key.extend_from_slice(self.secret.as_bytes());
        key.extend_from_slice(seed);
        let mut stream = KeyedStream::new(&key, self.hash_alg);
        key.zeroize();

        // Working copy of the sets. Without replacement, drawn characters
        // are removed; a set that empties drops out of the rotation and
        // later sets shift down.
        let mut working = self.character_sets.clone();

        let mut password = String::with_capacity(length);
        for i in 0..length {
            let set_index = i % working.len();
            let set = &mut working[set_index];
            let char_index = stream.next_int() as usize % set.len();
            password.push(set[char_index]);

            if self.non_replacement {
                set.remove(char_index);
                if set.is_empty() {
                    working.remove(set_index);
                }
            }
        }

        Ok(password)
    }
}

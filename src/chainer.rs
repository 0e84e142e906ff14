use zeroize::Zeroize;

use crate::stream::{HashAlgorithm, IntStream, KeyedStream};
use crate::{ConfigurationError, ConfigurationErrorRepr, Secret, DEFAULT_ALPHABET};

/// Walks a deterministic password sequence: each password is derived from
/// the secret plus the text of the previous one, with no external seed.
///
/// Feeding every output back in yields a reproducible forward chain. The
/// flip side is that the whole chain is determined by the secret and its
/// first entry, so compromising both reveals every later password.
pub struct Chainer {
    secret: Secret,
    hash_alg: HashAlgorithm,
    alphabet: Vec<char>,
}

impl Chainer {
    /// Shortest password [`next`](Chainer::next) will produce.
    pub const MIN_LENGTH: usize = 8;
    /// Length used when callers have no preference.
    pub const DEFAULT_LENGTH: usize = 10;

    /// Builds a chainer owning `secret`, drawing from `alphabet` under the
    /// given algorithm. Fails if the alphabet is empty.
    pub fn new(
        secret: Secret,
        hash_alg: HashAlgorithm,
        alphabet: &str,
    ) -> Result<Chainer, ConfigurationError> {
        if alphabet.is_empty() {
            return Err(ConfigurationErrorRepr::EmptyCharacterSet.into());
        }
        Ok(Chainer {
            secret,
            hash_alg,
            alphabet: alphabet.chars().collect(),
        })
    }

    /// Builds a chainer with SHA-256 and the 62-character alphanumeric
    /// alphabet.
    pub fn with_defaults(secret: Secret) -> Chainer {
        Chainer {
            secret,
            hash_alg: HashAlgorithm::default(),
            alphabet: DEFAULT_ALPHABET.chars().collect(),
        }
    }

    /// Derives the password following `previous` in the chain.
    ///
    /// Sampling is always with replacement, one stream draw per position,
    /// reduced modulo the alphabet length (the same accepted bias as
    /// seeded generation). `length` must be at least
    /// [`MIN_LENGTH`](Chainer::MIN_LENGTH).
    pub fn next(&self, previous: &str, length: usize) -> Result<String, ConfigurationError> {
        if length < Self::MIN_LENGTH {
            return Err(ConfigurationErrorRepr::ChainLengthTooShort {
                required: Self::MIN_LENGTH,
            }
            .into());
        }

        let previous = previous.as_bytes();
        let mut key = Vec::with_capacity(self.secret.as_bytes().len() + previous.len());
        key.extend_from_slice(self.secret.as_bytes());
        key.extend_from_slice(previous);
        let mut stream = KeyedStream::new(&key, self.hash_alg);
        key.zeroize();

        let mut password = String::with_capacity(length);
        for _ in 0..length {
            let char_index = stream.next_int() as usize % self.alphabet.len();
            password.push(self.alphabet[char_index]);
        }

        Ok(password)
    }
}

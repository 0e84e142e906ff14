//! Keyed reproducible integer streams.
//!
//! Every generation call keys a fresh stream with the secret concatenated
//! with that call's context (seed bytes or the previous password). The
//! stream is a digest chain: the key is hashed once, the digest output is
//! consumed four bytes at a time, and hashing the previous block produces
//! the next one. A fixed key and algorithm always replay the same
//! sequence; changing either changes the whole sequence.

use blake2::Blake2b512;
use digest::{Digest, FixedOutputReset};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};

/// Digest used to key an integer stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
    Blake2b512,
}

/// A reproducible source of non-negative integers.
///
/// Sampling code must assume nothing about the values beyond
/// reproducibility: given the same key and algorithm, successive calls
/// return the same sequence.
pub trait IntStream {
    fn next_int(&mut self) -> u32;
}

/// Integer stream backed by a chained digest over a key.
pub struct KeyedStream {
    inner: Inner,
}

enum Inner {
    Sha256(DigestChain<Sha256>),
    Sha512(DigestChain<Sha512>),
    Blake2b512(DigestChain<Blake2b512>),
}

impl KeyedStream {
    /// Creates a stream keyed by `key` under the given algorithm.
    pub fn new(key: &[u8], algorithm: HashAlgorithm) -> KeyedStream {
        let inner = match algorithm {
            HashAlgorithm::Sha256 => Inner::Sha256(DigestChain::new(key)),
            HashAlgorithm::Sha512 => Inner::Sha512(DigestChain::new(key)),
            HashAlgorithm::Blake2b512 => Inner::Blake2b512(DigestChain::new(key)),
        };
        KeyedStream { inner }
    }
}

impl IntStream for KeyedStream {
    fn next_int(&mut self) -> u32 {
        match &mut self.inner {
            Inner::Sha256(chain) => chain.next_u32(),
            Inner::Sha512(chain) => chain.next_u32(),
            Inner::Blake2b512(chain) => chain.next_u32(),
        }
    }
}

struct DigestChain<D: Digest + FixedOutputReset> {
    hasher: D,
    block: Vec<u8>,
    pos: usize,
}

impl<D: Digest + FixedOutputReset> DigestChain<D> {
    fn new(key: &[u8]) -> DigestChain<D> {
        let mut hasher = D::new();
        Digest::update(&mut hasher, key);
        let block = hasher.finalize_reset().to_vec();
        DigestChain {
            hasher,
            block,
            pos: 0,
        }
    }

    fn next_u32(&mut self) -> u32 {
        if self.pos + 4 > self.block.len() {
            Digest::update(&mut self.hasher, &self.block);
            self.block = self.hasher.finalize_reset().to_vec();
            self.pos = 0;
        }
        let bytes: [u8; 4] = self.block[self.pos..self.pos + 4].try_into().unwrap();
        self.pos += 4;
        u32::from_le_bytes(bytes)
    }
}

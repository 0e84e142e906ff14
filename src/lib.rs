//! Deterministic derivation of human-typable passwords from a secret and
//! per-call context. Nothing is ever persisted: the same inputs always
//! reproduce the same password, so the password itself never needs to be
//! stored.

mod chainer;
mod generator;
pub mod stream;

pub use chainer::Chainer;
pub use generator::{Generator, GeneratorOptions};
pub use stream::{HashAlgorithm, IntStream, KeyedStream};

/// The 62-character alphanumeric alphabet used when no character sets are
/// configured.
pub static DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Key material used to personalize every derived stream.
///
/// A `Secret` is supplied once, at construction of a [`Generator`] or
/// [`Chainer`], and is never part of any output. Its `Debug` impl is
/// opaque so the bytes cannot end up in logs, and the backing storage is
/// wiped when the value is dropped.
#[derive(Clone, Eq, PartialEq, zeroize::ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Secret {
        Secret(bytes)
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Secret {
        Secret(bytes.to_vec())
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s.into_bytes())
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Secret {
        Secret(s.as_bytes().to_vec())
    }
}

/// A caller-input problem detected while validating configuration or a
/// requested generation, before any characters are drawn.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ConfigurationError(ConfigurationErrorRepr);

impl From<ConfigurationErrorRepr> for ConfigurationError {
    fn from(err: ConfigurationErrorRepr) -> ConfigurationError {
        ConfigurationError(err)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigurationErrorRepr {
    #[error("at least one character set is required")]
    NoCharacterSets,
    #[error("character sets cannot be empty")]
    EmptyCharacterSet,
    #[error("length must be at least {required}")]
    LengthBelowSetCount { required: usize },
    #[error("length must not be longer than {max} with the non-replacement option")]
    LengthExceedsPool { max: usize },
    #[error("chained passwords must be at least {required} characters long")]
    ChainLengthTooShort { required: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_debug_does_not_leak_bytes() {
        let secret = Secret::from("hunter2");
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn secret_conversions_agree() {
        assert_eq!(Secret::from("abc"), Secret::from(b"abc".to_vec()));
        assert_eq!(Secret::from("abc"), Secret::from(&b"abc"[..]));
        assert_eq!(Secret::from("abc"), Secret::from(String::from("abc")));
    }

    #[test]
    fn error_messages_name_the_violated_bound() {
        let err = ConfigurationError::from(ConfigurationErrorRepr::LengthBelowSetCount {
            required: 3,
        });
        assert_eq!(err.to_string(), "length must be at least 3");

        let err = ConfigurationError::from(ConfigurationErrorRepr::LengthExceedsPool { max: 62 });
        assert_eq!(
            err.to_string(),
            "length must not be longer than 62 with the non-replacement option"
        );
    }
}

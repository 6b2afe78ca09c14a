//! Converts trie keys to and from their symbol bytes.
use std::borrow::Cow;
use std::str;

use crate::{Error, Result};

/// A key type a trie can store and hand back.
///
/// The trie only ever sees a key as a sequence of byte symbols. Keys produced by queries
/// are rebuilt from the symbols along a path, and every such path spells either a stored
/// key or a prefix of the caller's query. `put` runs [`TrieKey::validate`] first, so every
/// stored path rebuilds into a key that looks up the same path.
pub trait TrieKey: Sized {
    /// Returns the symbols of this key.
    ///
    /// `Cow` allows borrowing when the key already holds a byte slice.
    fn key_bytes(&self) -> Cow<'_, [u8]>;

    /// Rebuilds a key from the symbols of a trie path.
    fn from_key_bytes(bytes: Vec<u8>) -> Self;

    /// Checks that `bytes` can be stored and handed back without loss.
    fn validate(_bytes: &[u8]) -> Result<()> {
        Ok(())
    }
}

impl TrieKey for String {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }

    fn from_key_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(key) => key,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    fn validate(bytes: &[u8]) -> Result<()> {
        str::from_utf8(bytes)
            .map(|_| ())
            .map_err(|err| Error::InvalidKey {
                position: err.valid_up_to(),
                reason: "not valid UTF-8",
            })
    }
}

impl TrieKey for Vec<u8> {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }

    fn from_key_bytes(bytes: Vec<u8>) -> Self {
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_key_bytes() {
        let key = "hello".to_string();
        let bytes = key.key_bytes();
        assert_eq!(bytes.as_ref(), b"hello");
        assert!(matches!(bytes, Cow::Borrowed(_)));
    }

    #[test]
    fn test_vec_key_bytes() {
        let key = vec![1u8, 2, 3];
        let bytes = key.key_bytes();
        assert_eq!(bytes.as_ref(), &[1, 2, 3]);
        assert!(matches!(bytes, Cow::Borrowed(_)));
    }

    #[test]
    fn test_string_from_key_bytes() {
        assert_eq!(String::from_key_bytes(b"tea".to_vec()), "tea");
        assert_eq!(String::from_key_bytes(Vec::new()), "");
        // multi-byte symbols survive when the whole path is present
        assert_eq!(String::from_key_bytes("héllo".as_bytes().to_vec()), "héllo");
    }

    #[test]
    fn test_string_from_truncated_utf8_is_lossy() {
        let bytes = "é".as_bytes()[..1].to_vec();
        assert_eq!(String::from_key_bytes(bytes), "\u{FFFD}");
    }

    #[test]
    fn test_string_validate() {
        assert_eq!(String::validate("héllo".as_bytes()), Ok(()));
        assert_eq!(String::validate(b""), Ok(()));
        assert_eq!(
            String::validate(&[b'a', 0xff, b'b']),
            Err(Error::InvalidKey { position: 1, reason: "not valid UTF-8" })
        );
        assert!(String::validate(&"é".as_bytes()[..1]).is_err());
    }

    #[test]
    fn test_vec_accepts_any_bytes() {
        assert_eq!(Vec::<u8>::validate(&[0xff, 0xfe]), Ok(()));
    }

    #[test]
    fn test_vec_round_trip() {
        let key = vec![0u8, 255, 7];
        assert_eq!(Vec::<u8>::from_key_bytes(key.key_bytes().into_owned()), key);
    }
}

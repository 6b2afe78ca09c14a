use tracing::debug;

use crate::alphabet::Alphabet;
use crate::{Error, Result, TRIE_LOG_TARGET};

/// Finds the length of the common prefix of `key` and `other`.
pub fn prefix_match(key: &[u8], other: &[u8]) -> usize {
    key.iter()
        .zip(other.iter())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Returns `true` if `key` begins with every symbol of `prefix`.
pub fn starts_with(key: &[u8], prefix: &[u8]) -> bool {
    prefix_match(key, prefix) == prefix.len()
}

/// Maps every symbol of `key` to its alphabet index.
///
/// Fails on the first symbol the alphabet does not accept, reporting its position.
pub fn encode_key(alphabet: &Alphabet, key: &[u8]) -> Result<Vec<usize>> {
    key.iter()
        .enumerate()
        .map(|(position, &symbol)| {
            alphabet.index_of(symbol).ok_or_else(|| {
                debug!(target: TRIE_LOG_TARGET, symbol, position, "rejecting key with foreign symbol");
                Error::InvalidSymbol { symbol, position }
            })
        })
        .collect()
}

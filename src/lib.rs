//! # Symbol Trie
//!
//! A mutable prefix tree (trie) keyed by sequences of symbols drawn from a fixed alphabet.
//!
//! This crate provides a map, [`TrieMap`], and a set built on top of it, [`TrieSet`]. Every
//! node owns its children outright, so removing a key prunes the branch that only existed
//! to reach it.
//!
//! ## Features
//!
//! - **Exact lookup**: `put`, `get`, `remove` and `contains_key` in O(key length)
//! - **Prefix queries**: shortest and longest stored prefix of a query, enumeration of keys under a prefix
//! - **Wildcard patterns**: fixed-length patterns where `.` matches any single symbol
//! - **Configurable alphabet**: reject symbols outside a fixed [`Alphabet`] instead of storing them
//! - **Node layouts**: sparse ordered child tables or dense fixed-size arrays, chosen per trie
//!
//! ## Example
//!
//! ```rust
//! use symbol_trie::TrieMap;
//!
//! let mut trie = TrieMap::<u32>::new();
//! trie.put("tea", 1).unwrap();
//! trie.put("ten", 2).unwrap();
//! trie.put("to", 3).unwrap();
//!
//! assert_eq!(trie.get("tea"), Some(&1));
//! assert_eq!(trie.keys_with_prefix("te"), vec!["tea".to_string(), "ten".to_string()]);
//!
//! trie.remove("tea");
//! assert!(!trie.contains_key("tea"));
//! assert_eq!(trie.get("ten"), Some(&2));
//! assert_eq!(trie.len(), 2);
//! ```

mod alphabet;
mod config;
mod key_converter;
mod node;
mod pattern;
mod prefix_view;
mod set;
mod trie;
mod util;

#[cfg(test)]
mod qc_tests;

// Re-export public types
pub use crate::alphabet::Alphabet;
pub use crate::config::{NodeLayout, TrieConfig};
pub use crate::key_converter::TrieKey;
pub use crate::pattern::{Pattern, PatternSymbol, WILDCARD};
pub use crate::prefix_view::{PrefixIter, PrefixView};
pub use crate::set::{Iter as SetIter, TrieSet};
pub use crate::trie::TrieMap;

/// Target used for every `tracing` event emitted by this crate.
pub const TRIE_LOG_TARGET: &str = "symbol_trie";

/// Errors that can occur in trie operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A key contained a symbol the trie's alphabet does not accept
    #[error("symbol {symbol:#04x} at position {position} is outside the alphabet")]
    InvalidSymbol { symbol: u8, position: usize },
    /// A key's symbols do not form a value of the trie's key type
    #[error("invalid key at position {position}: {reason}")]
    InvalidKey { position: usize, reason: &'static str },
    /// A pattern string could not be parsed
    #[error("invalid pattern at position {position}: {reason}")]
    InvalidPattern { position: usize, reason: &'static str },
    /// An alphabet was built from no symbols at all
    #[error("an alphabet needs at least one symbol")]
    EmptyAlphabet,
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Fixed symbol alphabets.
//!
//! An [`Alphabet`] is the closed set of byte symbols a trie accepts. Each symbol maps to a
//! dense index in `0..radix`, assigned in ascending symbol order, so walking a node's
//! children by index visits them in lexicographic order.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::{Error, Result};

static BYTES: Lazy<Arc<Alphabet>> = Lazy::new(|| Arc::new(Alphabet::build(0..=u8::MAX)));

/// A fixed, enumerable set of symbols.
///
/// # Examples
///
/// ```
/// use symbol_trie::Alphabet;
///
/// let alphabet = Alphabet::lowercase();
/// assert_eq!(alphabet.radix(), 26);
/// assert_eq!(alphabet.index_of(b'c'), Some(2));
/// assert!(!alphabet.contains(b'A'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Accepted symbols, sorted ascending and deduplicated
    symbols: Vec<u8>,

    /// Dense index of each accepted symbol, `None` for the rest
    index: [Option<u8>; 256],
}

impl Alphabet {
    fn build<I: IntoIterator<Item = u8>>(symbols: I) -> Self {
        let mut present = [false; 256];
        for symbol in symbols {
            present[symbol as usize] = true;
        }

        let mut sorted = Vec::new();
        let mut index = [None; 256];
        for (symbol, _) in present.iter().enumerate().filter(|&(_, &p)| p) {
            index[symbol] = Some(sorted.len() as u8);
            sorted.push(symbol as u8);
        }

        Alphabet { symbols: sorted, index }
    }

    /// Builds an alphabet from an arbitrary collection of symbols.
    ///
    /// Duplicates collapse; an empty collection is rejected.
    pub fn from_symbols<I: IntoIterator<Item = u8>>(symbols: I) -> Result<Self> {
        let alphabet = Self::build(symbols);
        if alphabet.symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(alphabet)
    }

    /// Every byte value. This is the default alphabet.
    pub fn bytes() -> Self {
        (**BYTES).clone()
    }

    /// The 7-bit ASCII range `0..128`.
    pub fn ascii() -> Self {
        Self::build(0..128u8)
    }

    /// The lowercase ASCII letters `a..=z`.
    pub fn lowercase() -> Self {
        Self::build(b'a'..=b'z')
    }

    /// Shared handle to the byte alphabet.
    pub(crate) fn shared_bytes() -> Arc<Alphabet> {
        Arc::clone(&BYTES)
    }

    /// Number of symbols in the alphabet.
    pub fn radix(&self) -> usize {
        self.symbols.len()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.index[symbol as usize].is_some()
    }

    /// Returns the dense index of `symbol`, or `None` if it is not in the alphabet.
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.index[symbol as usize].map(usize::from)
    }

    /// Returns the symbol at a dense index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.radix()`.
    pub fn symbol_at(&self, index: usize) -> u8 {
        self.symbols[index]
    }

    /// The accepted symbols in ascending order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::bytes()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("radix", &self.radix())
            .field("first", &self.symbols.first())
            .field("last", &self.symbols.last())
            .finish()
    }
}

//! Fixed-length wildcard patterns.
//!
//! In pattern text, `.` matches exactly one symbol of any kind. A literal dot is written
//! `\.` and a literal backslash `\\`; no other escapes exist. This keeps `.` usable as
//! ordinary key data in every alphabet.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::{Error, Result, TRIE_LOG_TARGET};

/// The wildcard symbol in pattern text.
pub const WILDCARD: u8 = b'.';

const ESCAPE: u8 = b'\\';

/// One position of a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternSymbol {
    /// Matches exactly this symbol.
    Literal(u8),
    /// Matches any single symbol.
    Any,
}

/// A parsed wildcard pattern.
///
/// # Examples
///
/// ```
/// use symbol_trie::{Pattern, PatternSymbol};
///
/// let pattern = Pattern::parse("c.t").unwrap();
/// assert_eq!(pattern.len(), 3);
/// assert_eq!(pattern.wildcards(), 1);
///
/// let dotted = Pattern::parse(r"a\.b").unwrap();
/// assert_eq!(dotted.symbols()[1], PatternSymbol::Literal(b'.'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    symbols: Vec<PatternSymbol>,
}

impl Pattern {
    /// Parses pattern text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_bytes(text.as_bytes())
    }

    /// Parses pattern text given as raw bytes.
    pub fn parse_bytes(text: &[u8]) -> Result<Self> {
        let mut symbols = Vec::with_capacity(text.len());
        let mut bytes = text.iter().copied().enumerate();

        while let Some((position, byte)) = bytes.next() {
            let symbol = match byte {
                WILDCARD => PatternSymbol::Any,
                ESCAPE => match bytes.next() {
                    Some((_, escaped @ WILDCARD)) | Some((_, escaped @ ESCAPE)) => {
                        PatternSymbol::Literal(escaped)
                    }
                    Some(_) => return Err(invalid(position, "unknown escape sequence")),
                    None => return Err(invalid(position, "trailing escape")),
                },
                literal => PatternSymbol::Literal(literal),
            };
            symbols.push(symbol);
        }

        Ok(Pattern { symbols })
    }

    /// Builds a pattern directly from its positions, bypassing text escapes.
    pub fn from_positions(symbols: Vec<PatternSymbol>) -> Self {
        Pattern { symbols }
    }

    /// Number of symbols a matching key has.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of wildcard positions.
    pub fn wildcards(&self) -> usize {
        self.symbols
            .iter()
            .filter(|s| matches!(s, PatternSymbol::Any))
            .count()
    }

    pub fn symbols(&self) -> &[PatternSymbol] {
        &self.symbols
    }

    /// Checks a full key against the pattern without consulting any trie.
    pub fn matches(&self, key: &[u8]) -> bool {
        key.len() == self.symbols.len()
            && self.symbols.iter().zip(key).all(|(p, &k)| match *p {
                PatternSymbol::Any => true,
                PatternSymbol::Literal(l) => l == k,
            })
    }
}

fn invalid(position: usize, reason: &'static str) -> Error {
    debug!(target: TRIE_LOG_TARGET, position, reason, "rejecting pattern");
    Error::InvalidPattern { position, reason }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

/// Renders pattern text. Non-ASCII literals print as `\xNN`, which `parse` does not read back.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            match *symbol {
                PatternSymbol::Any => f.write_str(".")?,
                PatternSymbol::Literal(WILDCARD) => f.write_str("\\.")?,
                PatternSymbol::Literal(ESCAPE) => f.write_str("\\\\")?,
                PatternSymbol::Literal(b) if b.is_ascii() => write!(f, "{}", b as char)?,
                PatternSymbol::Literal(b) => write!(f, "\\x{:02x}", b)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PatternSymbol::{Any, Literal};

    #[test]
    fn test_parse_wildcards() {
        let pattern = Pattern::parse("ca.").unwrap();
        assert_eq!(pattern.symbols(), &[Literal(b'c'), Literal(b'a'), Any]);
        assert_eq!(pattern.wildcards(), 1);
    }

    #[test]
    fn test_parse_escapes() {
        let pattern = Pattern::parse(r"\.\\.").unwrap();
        assert_eq!(pattern.symbols(), &[Literal(b'.'), Literal(b'\\'), Any]);
        assert_eq!(pattern.wildcards(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Pattern::parse(r"ab\"),
            Err(Error::InvalidPattern { position: 2, reason: "trailing escape" })
        );
        assert_eq!(
            Pattern::parse(r"a\xb"),
            Err(Error::InvalidPattern { position: 1, reason: "unknown escape sequence" })
        );
    }

    #[test]
    fn test_empty_pattern() {
        let pattern: Pattern = "".parse().unwrap();
        assert!(pattern.is_empty());
        assert!(pattern.matches(b""));
        assert!(!pattern.matches(b"a"));
    }

    #[test]
    fn test_matches() {
        let pattern = Pattern::parse("c.t").unwrap();
        assert!(pattern.matches(b"cat"));
        assert!(pattern.matches(b"cut"));
        assert!(!pattern.matches(b"car"));
        assert!(!pattern.matches(b"cats"));
    }

    #[test]
    fn test_display_reescapes() {
        let text = r"a.\.\\";
        let pattern = Pattern::parse(text).unwrap();
        assert_eq!(pattern.to_string(), text);
    }
}

//! A set of symbol sequences backed by `TrieMap`.

use std::fmt;

use crate::alphabet::Alphabet;
use crate::config::TrieConfig;
use crate::key_converter::TrieKey;
use crate::pattern::Pattern;
use crate::prefix_view::PrefixIter;
use crate::trie::TrieMap;
use crate::Result;

/// A set of keys stored in a prefix tree.
///
/// Every operation forwards to an inner `TrieMap<(), K>`.
///
/// # Examples
///
/// ```
/// use symbol_trie::TrieSet;
///
/// let mut set = TrieSet::new();
/// assert!(set.add("cat").unwrap());
/// assert!(!set.add("cat").unwrap());
/// set.add("car").unwrap();
///
/// assert!(set.contains("car"));
/// assert_eq!(set.keys_with_prefix("ca"), vec!["car", "cat"]);
/// assert!(set.remove("cat"));
/// assert_eq!(set.len(), 1);
/// ```
pub struct TrieSet<K = String> {
    map: TrieMap<(), K>,
}

impl TrieSet {
    /// Creates an empty set over the byte alphabet.
    pub fn new() -> Self {
        TrieSet {
            map: TrieMap::new(),
        }
    }

    /// Creates an empty set accepting only symbols of `alphabet`.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        TrieSet {
            map: TrieMap::with_alphabet(alphabet),
        }
    }

    pub fn with_config(config: TrieConfig) -> Self {
        TrieSet {
            map: TrieMap::with_config(config),
        }
    }
}

impl<K> TrieSet<K> {
    /// Creates an empty set for any key type.
    pub fn from_config(config: TrieConfig) -> Self {
        TrieSet {
            map: TrieMap::from_config(config),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }

    /// Adds `key`, returning `true` if it was not already present.
    pub fn add<Q>(&mut self, key: &Q) -> Result<bool>
    where
        K: TrieKey,
        Q: AsRef<[u8]> + ?Sized,
    {
        Ok(self.map.put(key, ())?.is_none())
    }

    /// Removes `key`, returning `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.map.remove(key).is_some()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn has_key_with_prefix<Q>(&self, prefix: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.map.has_key_with_prefix(prefix)
    }

    pub fn has_key_with_pattern(&self, pattern: &str) -> Result<bool> {
        self.map.has_key_with_pattern(pattern)
    }

    pub fn has_match(&self, pattern: &Pattern) -> bool {
        self.map.has_match(pattern)
    }

    /// Returns the underlying map.
    pub fn as_map(&self) -> &TrieMap<(), K> {
        &self.map
    }
}

impl<K: TrieKey> TrieSet<K> {
    pub fn shortest_prefix_of<Q>(&self, query: &Q) -> Option<K>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.map.shortest_prefix_of(query)
    }

    pub fn longest_prefix_of<Q>(&self, query: &Q) -> Option<K>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.map.longest_prefix_of(query)
    }

    pub fn keys_with_prefix<Q>(&self, prefix: &Q) -> Vec<K>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.map.keys_with_prefix(prefix)
    }

    pub fn keys_with_pattern(&self, pattern: &str) -> Result<Vec<K>> {
        self.map.keys_with_pattern(pattern)
    }

    pub fn keys_matching(&self, pattern: &Pattern) -> Vec<K> {
        self.map.keys_matching(pattern)
    }

    /// Iterates over the keys in lexicographic order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.map.iter(),
        }
    }

    /// Adds every key from `keys`, stopping at the first rejected one.
    pub fn try_extend<I>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
    {
        self.map.try_extend(keys.into_iter().map(|key| (key, ())))
    }
}

/// Iterator over the keys of a `TrieSet`.
pub struct Iter<'a, K> {
    inner: PrefixIter<'a, (), K>,
}

impl<'a, K: TrieKey> Iterator for Iter<'a, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl<'a, K: TrieKey> IntoIterator for &'a TrieSet<K> {
    type Item = K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Default for TrieSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for TrieSet<K> {
    fn clone(&self) -> Self {
        TrieSet {
            map: self.map.clone(),
        }
    }
}

impl<K: TrieKey + fmt::Debug> fmt::Debug for TrieSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

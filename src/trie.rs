//! The main trie implementation.
//!
//! This module contains the `TrieMap` type, which provides the primary API for working
//! with the trie data structure.

use std::fmt;
use std::iter;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::config::{NodeLayout, TrieConfig};
use crate::key_converter::TrieKey;
use crate::node::TrieNode;
use crate::pattern::{Pattern, PatternSymbol};
use crate::prefix_view::{PrefixIter, PrefixView};
use crate::util::encode_key;
use crate::{Result, TRIE_LOG_TARGET};

/// A prefix tree mapping symbol sequences to values.
///
/// Keys are sequences of byte symbols drawn from the trie's [`Alphabet`]. Every node owns
/// its children; a node exists only while it stores a value or leads to one, so removing a
/// key prunes whatever branch existed only for it.
///
/// `K` is the type keys are handed back as by enumeration and prefix queries. Lookups
/// accept anything that can be viewed as bytes, so `&str` and `&[u8]` both work.
pub struct TrieMap<V, K = String> {
    /// The root node of the trie. It always exists, even when empty.
    pub(crate) root: TrieNode<V>,

    /// The number of values stored in the trie
    size: usize,

    pub(crate) alphabet: Arc<Alphabet>,

    layout: NodeLayout,

    _key: PhantomData<fn() -> K>,
}

impl<V> TrieMap<V> {
    /// Creates a new, empty trie over the byte alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let trie = TrieMap::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::from_config(TrieConfig::default())
    }

    /// Creates a new, empty trie accepting only symbols of `alphabet`.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self::from_config(TrieConfig::default().alphabet(alphabet))
    }

    /// Creates a new, empty trie from a full configuration.
    pub fn with_config(config: TrieConfig) -> Self {
        Self::from_config(config)
    }
}

impl<V, K> TrieMap<V, K> {
    /// Creates a new, empty trie for any key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::{TrieConfig, TrieMap};
    ///
    /// let mut trie = TrieMap::<u8, Vec<u8>>::from_config(TrieConfig::default());
    /// trie.put(&[0xffu8, 0x00][..], 1).unwrap();
    /// assert_eq!(trie.keys_with_prefix(&[0xffu8][..]), vec![vec![0xffu8, 0x00]]);
    /// ```
    pub fn from_config(config: TrieConfig) -> Self {
        let root = TrieNode::new(config.layout, config.alphabet.radix());
        TrieMap {
            root,
            size: 0,
            alphabet: config.alphabet,
            layout: config.layout,
            _key: PhantomData,
        }
    }

    /// Returns the number of values stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.put("hello", 42).unwrap();
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The alphabet keys are drawn from.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn layout(&self) -> NodeLayout {
        self.layout
    }

    /// Removes every key, freeing all nodes.
    pub fn clear(&mut self) {
        self.root = TrieNode::new(self.layout, self.alphabet.radix());
        self.size = 0;
    }

    /// Inserts a value for `key`, returning the value it replaces.
    ///
    /// The empty key is valid and is stored on the root. Fails without modifying the trie
    /// if any symbol of `key` is outside the alphabet, or if the symbols cannot be handed
    /// back as a `K` (non-UTF-8 bytes in a `String`-keyed trie).
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// assert_eq!(trie.put("hello", 42).unwrap(), None);
    /// assert_eq!(trie.put("hello", 7).unwrap(), Some(42));
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn put<Q>(&mut self, key: &Q, value: V) -> Result<Option<V>>
    where
        K: TrieKey,
        Q: AsRef<[u8]> + ?Sized,
    {
        let path = encode_key(&self.alphabet, key.as_ref())?;
        K::validate(key.as_ref()).map_err(|err| {
            debug!(target: TRIE_LOG_TARGET, %err, "rejecting key");
            err
        })?;
        let radix = self.alphabet.radix();

        let previous = Self::put_below(&mut self.root, &path, value, self.layout, radix);
        if previous.is_none() {
            self.size += 1;
        }

        trace!(
            target: TRIE_LOG_TARGET,
            key_len = path.len(),
            replaced = previous.is_some(),
            size = self.size,
            "put"
        );
        Ok(previous)
    }

    // Takes ownership of a possibly absent subtree and returns the subtree that must
    // replace it in the parent.
    fn put_into(
        node: Option<Box<TrieNode<V>>>,
        path: &[usize],
        value: V,
        layout: NodeLayout,
        radix: usize,
    ) -> (Box<TrieNode<V>>, Option<V>) {
        let mut node = node.unwrap_or_else(|| Box::new(TrieNode::new(layout, radix)));
        let previous = Self::put_below(&mut node, path, value, layout, radix);
        (node, previous)
    }

    fn put_below(
        node: &mut TrieNode<V>,
        path: &[usize],
        value: V,
        layout: NodeLayout,
        radix: usize,
    ) -> Option<V> {
        match path.split_first() {
            None => node.value.replace(value),
            Some((&index, rest)) => {
                let child = node.children.take(index);
                let (child, previous) = Self::put_into(child, rest, value, layout, radix);
                node.children.set(index, child);
                previous
            }
        }
    }

    /// Removes `key` from the trie, returning its value if it was present.
    ///
    /// Removing an absent key changes nothing. A key holding a symbol outside the alphabet
    /// can never be stored, so it is treated as absent rather than reported as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// trie.put("hello", 42).unwrap();
    ///
    /// assert_eq!(trie.remove("hello"), Some(42));
    /// assert_eq!(trie.remove("hello"), None);
    /// assert!(trie.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let path = self.path_of(key.as_ref())?;
        let removed = Self::remove_below(&mut self.root, &path)?;
        self.size -= 1;

        trace!(target: TRIE_LOG_TARGET, key_len = path.len(), size = self.size, "removed");
        Some(removed)
    }

    // Returns `None` in place of the subtree when it no longer stores or leads to a value.
    fn remove_into(mut node: Box<TrieNode<V>>, path: &[usize]) -> (Option<Box<TrieNode<V>>>, Option<V>) {
        let removed = Self::remove_below(&mut node, path);
        if node.is_prunable() {
            trace!(target: TRIE_LOG_TARGET, remaining = path.len(), "pruned node");
            (None, removed)
        } else {
            (Some(node), removed)
        }
    }

    fn remove_below(node: &mut TrieNode<V>, path: &[usize]) -> Option<V> {
        match path.split_first() {
            None => node.value.take(),
            Some((&index, rest)) => {
                let child = node.children.take(index)?;
                let (child, removed) = Self::remove_into(child, rest);
                if let Some(child) = child {
                    node.children.set(index, child);
                }
                removed
            }
        }
    }

    /// Retrieves a reference to the value stored for the given key, if any.
    ///
    /// Returns `None`, not an error, for a key holding a symbol outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// trie.put("hello", 42).unwrap();
    ///
    /// assert_eq!(trie.get("hello"), Some(&42));
    /// assert_eq!(trie.get("hell"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.node_at(key.as_ref())?.value.as_ref()
    }

    /// Like [`get`](Self::get), but hands back a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let mut node = &mut self.root;
        for &symbol in key.as_ref() {
            let index = self.alphabet.index_of(symbol)?;
            node = node.children.get_mut(index)?;
        }
        node.value.as_mut()
    }

    /// Returns `true` if the trie contains a value for the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns `true` if at least one stored key starts with `prefix`.
    ///
    /// Every node below the root stores or leads to a value, so this only has to find the
    /// node at the end of `prefix`.
    pub fn has_key_with_prefix<Q>(&self, prefix: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.node_at(prefix.as_ref())
            .map_or(false, |node| !node.is_prunable())
    }

    /// Returns `true` if some stored key matches `pattern`.
    ///
    /// Fails only if the pattern text is malformed.
    pub fn has_key_with_pattern(&self, pattern: &str) -> Result<bool> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.has_match(&pattern))
    }

    /// Returns `true` if some stored key matches an already parsed pattern.
    pub fn has_match(&self, pattern: &Pattern) -> bool {
        self.any_match(&self.root, pattern.symbols())
    }

    fn any_match(&self, node: &TrieNode<V>, pattern: &[PatternSymbol]) -> bool {
        match pattern.split_first() {
            None => node.value.is_some(),
            Some((&PatternSymbol::Literal(symbol), rest)) => self
                .child_for(node, symbol)
                .map_or(false, |child| self.any_match(child, rest)),
            Some((PatternSymbol::Any, rest)) => node
                .children
                .iter()
                .any(|(_, child)| self.any_match(child, rest)),
        }
    }

    /// Creates a view of the keys under `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// trie.put("hello", 1).unwrap();
    /// trie.put("help", 2).unwrap();
    /// trie.put("world", 3).unwrap();
    ///
    /// let view = trie.view_prefix("hel");
    /// assert_eq!(view.len(), 2);
    /// assert!(view.contains_key("help"));
    /// assert!(!view.contains_key("world"));
    /// ```
    pub fn view_prefix<Q>(&self, prefix: &Q) -> PrefixView<'_, V, K>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let prefix = prefix.as_ref();
        PrefixView::new(self, prefix.to_vec(), self.node_at(prefix))
    }

    /// Iterates over every entry in lexicographic key order.
    pub fn iter(&self) -> PrefixIter<'_, V, K> {
        PrefixIter::new(&self.alphabet, &self.root, Vec::new())
    }

    // Walks `query` from the root, yielding each node on its path with its depth.
    // Stops early where the path leaves the trie or the alphabet.
    fn path_nodes<'a>(&'a self, query: &'a [u8]) -> impl Iterator<Item = (usize, &'a TrieNode<V>)> + 'a {
        let alphabet = &*self.alphabet;
        iter::successors(Some((0, &self.root)), move |&(depth, node)| {
            let symbol = *query.get(depth)?;
            let child = node.children.get(alphabet.index_of(symbol)?)?;
            Some((depth + 1, child))
        })
    }

    pub(crate) fn node_at(&self, key: &[u8]) -> Option<&TrieNode<V>> {
        key.iter()
            .try_fold(&self.root, |node, &symbol| self.child_for(node, symbol))
    }

    pub(crate) fn child_for<'a>(&self, node: &'a TrieNode<V>, symbol: u8) -> Option<&'a TrieNode<V>> {
        node.children.get(self.alphabet.index_of(symbol)?)
    }

    fn path_of(&self, key: &[u8]) -> Option<Vec<usize>> {
        key.iter().map(|&symbol| self.alphabet.index_of(symbol)).collect()
    }
}

impl<V, K: TrieKey> TrieMap<V, K> {
    /// Returns the shortest stored key that is a prefix of `query`.
    ///
    /// `None` means no stored key is a prefix of `query`. If the empty key is stored it is a
    /// prefix of everything, so the result is then always the empty key.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// trie.put("a", 1).unwrap();
    /// trie.put("ab", 2).unwrap();
    /// trie.put("abc", 3).unwrap();
    ///
    /// assert_eq!(trie.shortest_prefix_of("abcd"), Some("a".to_string()));
    /// assert_eq!(trie.longest_prefix_of("abcd"), Some("abc".to_string()));
    /// assert_eq!(trie.shortest_prefix_of("b"), None);
    /// ```
    pub fn shortest_prefix_of<Q>(&self, query: &Q) -> Option<K>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let query = query.as_ref();
        self.path_nodes(query)
            .find(|(_, node)| node.value.is_some())
            .map(|(depth, _)| K::from_key_bytes(query[..depth].to_vec()))
    }

    /// Returns the longest stored key that is a prefix of `query`.
    pub fn longest_prefix_of<Q>(&self, query: &Q) -> Option<K>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let query = query.as_ref();
        self.path_nodes(query)
            .filter(|(_, node)| node.value.is_some())
            .last()
            .map(|(depth, _)| K::from_key_bytes(query[..depth].to_vec()))
    }

    /// Returns every stored key starting with `prefix`, in lexicographic order.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// trie.put("ten", 2).unwrap();
    /// trie.put("tea", 1).unwrap();
    /// trie.put("to", 3).unwrap();
    ///
    /// assert_eq!(trie.keys_with_prefix("te"), vec!["tea".to_string(), "ten".to_string()]);
    /// assert!(trie.keys_with_prefix("x").is_empty());
    /// ```
    pub fn keys_with_prefix<Q>(&self, prefix: &Q) -> Vec<K>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let prefix = prefix.as_ref();
        let mut keys = Vec::new();
        if let Some(node) = self.node_at(prefix) {
            self.collect_keys(node, &mut prefix.to_vec(), &mut keys);
        }
        keys
    }

    /// Iterates over every value in lexicographic key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Returns every stored key, in lexicographic order.
    pub fn keys(&self) -> Vec<K> {
        self.keys_with_prefix("")
    }

    pub(crate) fn collect_keys(&self, node: &TrieNode<V>, path: &mut Vec<u8>, keys: &mut Vec<K>) {
        if node.value.is_some() {
            keys.push(K::from_key_bytes(path.clone()));
        }

        for (index, child) in node.children.iter() {
            path.push(self.alphabet.symbol_at(index));
            self.collect_keys(child, path, keys);
            path.pop();
        }
    }

    /// Returns every stored key matching `pattern`, in lexicographic order.
    ///
    /// In the pattern `.` matches any one symbol; `\.` and `\\` match a literal dot and
    /// backslash. Fails only if the pattern text is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_trie::TrieMap;
    ///
    /// let mut trie = TrieMap::<i32>::new();
    /// trie.put("cat", 1).unwrap();
    /// trie.put("car", 2).unwrap();
    /// trie.put("cap", 3).unwrap();
    ///
    /// assert_eq!(trie.keys_with_pattern("ca.").unwrap(), vec!["cap", "car", "cat"]);
    /// assert!(trie.has_key_with_pattern("c.t").unwrap());
    /// assert!(!trie.has_key_with_pattern("d..").unwrap());
    /// ```
    pub fn keys_with_pattern(&self, pattern: &str) -> Result<Vec<K>> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.keys_matching(&pattern))
    }

    /// Returns every stored key matching an already parsed pattern.
    pub fn keys_matching(&self, pattern: &Pattern) -> Vec<K> {
        let mut keys = Vec::new();
        let mut path = Vec::with_capacity(pattern.len());
        self.collect_matches(&self.root, pattern.symbols(), &mut path, &mut keys);
        keys
    }

    fn collect_matches(
        &self,
        node: &TrieNode<V>,
        pattern: &[PatternSymbol],
        path: &mut Vec<u8>,
        keys: &mut Vec<K>,
    ) {
        match pattern.split_first() {
            None => {
                if node.value.is_some() {
                    keys.push(K::from_key_bytes(path.clone()));
                }
            }
            Some((&PatternSymbol::Literal(symbol), rest)) => {
                if let Some(child) = self.child_for(node, symbol) {
                    path.push(symbol);
                    self.collect_matches(child, rest, path, keys);
                    path.pop();
                }
            }
            Some((PatternSymbol::Any, rest)) => {
                for (index, child) in node.children.iter() {
                    path.push(self.alphabet.symbol_at(index));
                    self.collect_matches(child, rest, path, keys);
                    path.pop();
                }
            }
        }
    }

    /// Inserts every pair from `entries`, stopping at the first rejected key.
    ///
    /// Pairs before the rejected one stay inserted.
    pub fn try_extend<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.put(&*key.key_bytes(), value)?;
        }
        Ok(())
    }
}

impl<'a, V, K: TrieKey> IntoIterator for &'a TrieMap<V, K> {
    type Item = (K, &'a V);
    type IntoIter = PrefixIter<'a, V, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, K> Default for TrieMap<V, K> {
    fn default() -> Self {
        Self::from_config(TrieConfig::default())
    }
}

impl<V: Clone, K> Clone for TrieMap<V, K> {
    fn clone(&self) -> Self {
        TrieMap {
            root: self.root.clone(),
            size: self.size,
            alphabet: Arc::clone(&self.alphabet),
            layout: self.layout,
            _key: PhantomData,
        }
    }
}

impl<V: fmt::Debug, K: TrieKey + fmt::Debug> fmt::Debug for TrieMap<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

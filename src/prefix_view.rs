//! Prefix view into a trie.
//!
//! This module provides the `PrefixView` type, a borrowed window onto the keys of a
//! `TrieMap` that share a prefix, and `PrefixIter`, the lazy depth-first iterator both the
//! view and the map use for enumeration.

use std::fmt;
use std::marker::PhantomData;

use crate::alphabet::Alphabet;
use crate::key_converter::TrieKey;
use crate::node::TrieNode;
use crate::trie::TrieMap;
use crate::util::starts_with;

/// A lightweight view into the subtrie under a key prefix.
///
/// The node at the end of the prefix is located once, when the view is created; lookups
/// through the view only walk the part of the key after the prefix.
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
/// assert!(view.exists());
/// assert_eq!(view.get("help"), Some(&2));
///
/// let keys: Vec<String> = view.iter().map(|(key, _)| key).collect();
/// assert_eq!(keys, vec!["hello", "help"]);
/// ```
pub struct PrefixView<'a, V, K = String> {
    /// The source trie for this view
    trie: &'a TrieMap<V, K>,

    /// The key prefix defining this view
    prefix: Vec<u8>,

    /// The subtrie node at the prefix, if it exists
    subtrie_node: Option<&'a TrieNode<V>>,
}

impl<'a, V, K> PrefixView<'a, V, K> {
    pub(crate) fn new(
        trie: &'a TrieMap<V, K>,
        prefix: Vec<u8>,
        subtrie_node: Option<&'a TrieNode<V>>,
    ) -> Self {
        PrefixView {
            trie,
            prefix,
            subtrie_node,
        }
    }

    /// Returns the key prefix for this view.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the underlying trie.
    pub fn trie(&self) -> &'a TrieMap<V, K> {
        self.trie
    }

    /// Returns whether any stored key starts with the prefix.
    pub fn exists(&self) -> bool {
        self.subtrie_node.map_or(false, |node| !node.is_prunable())
    }

    /// Returns the number of entries in this subtrie view.
    ///
    /// Counts by walking the subtrie.
    pub fn len(&self) -> usize {
        self.subtrie_node.map_or(0, TrieNode::subtree_size)
    }

    /// Returns whether this view is empty (contains no entries).
    pub fn is_empty(&self) -> bool {
        !self.exists()
    }

    /// Gets the value for a key if it exists in this prefix view.
    ///
    /// Keys that do not start with the prefix are never in the view.
    pub fn get<Q>(&self, key: &Q) -> Option<&'a V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        if !starts_with(key, &self.prefix) {
            return None;
        }

        let start = self.subtrie_node?;
        key[self.prefix.len()..]
            .iter()
            .try_fold(start, |node, &symbol| self.trie.child_for(node, symbol))?
            .value
            .as_ref()
    }

    /// Checks if the view contains a key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an iterator over the entries in the prefix view.
    ///
    /// The iterator yields `(K, &V)` pairs in lexicographic key order.
    pub fn iter(&self) -> PrefixIter<'a, V, K> {
        match self.subtrie_node {
            Some(node) => PrefixIter::new(&self.trie.alphabet, node, self.prefix.clone()),
            None => PrefixIter::empty(&self.trie.alphabet),
        }
    }
}

impl<'a, V, K: TrieKey> PrefixView<'a, V, K> {
    /// Collects the keys in this view, in lexicographic order.
    pub fn keys(&self) -> Vec<K> {
        let mut keys = Vec::new();
        if let Some(node) = self.subtrie_node {
            self.trie
                .collect_keys(node, &mut self.prefix.clone(), &mut keys);
        }
        keys
    }
}

impl<'a, V, K> Clone for PrefixView<'a, V, K> {
    fn clone(&self) -> Self {
        PrefixView {
            trie: self.trie,
            prefix: self.prefix.clone(),
            subtrie_node: self.subtrie_node,
        }
    }
}

impl<'a, V, K> fmt::Debug for PrefixView<'a, V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("exists", &self.exists())
            .finish()
    }
}

impl<'v, 'a, V, K: TrieKey> IntoIterator for &'v PrefixView<'a, V, K> {
    type Item = (K, &'a V);
    type IntoIter = PrefixIter<'a, V, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries below a trie node.
///
/// This iterator performs a depth-first traversal with an explicit stack, visiting
/// children in ascending symbol order, so keys come out sorted.
pub struct PrefixIter<'a, V, K = String> {
    /// Nodes still to visit, with the full key path leading to each
    stack: Vec<(&'a TrieNode<V>, Vec<u8>)>,

    alphabet: &'a Alphabet,

    _key: PhantomData<fn() -> K>,
}

impl<'a, V, K> PrefixIter<'a, V, K> {
    pub(crate) fn new(alphabet: &'a Alphabet, node: &'a TrieNode<V>, path: Vec<u8>) -> Self {
        PrefixIter {
            stack: vec![(node, path)],
            alphabet,
            _key: PhantomData,
        }
    }

    fn empty(alphabet: &'a Alphabet) -> Self {
        PrefixIter {
            stack: Vec::new(),
            alphabet,
            _key: PhantomData,
        }
    }
}

impl<'a, V, K: TrieKey> Iterator for PrefixIter<'a, V, K> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, path)) = self.stack.pop() {
            // Reverse order so the smallest child is popped first
            for (index, child) in node.children.iter().rev() {
                let mut child_path = Vec::with_capacity(path.len() + 1);
                child_path.extend_from_slice(&path);
                child_path.push(self.alphabet.symbol_at(index));
                self.stack.push((child, child_path));
            }

            if let Some(value) = &node.value {
                return Some((K::from_key_bytes(path), value));
            }
        }

        None
    }
}

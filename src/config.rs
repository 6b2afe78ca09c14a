//! Construction-time configuration for a trie.

use std::sync::Arc;

use crate::alphabet::Alphabet;

/// How a node stores its children.
///
/// The choice is invisible to callers: both layouts keep children in ascending symbol
/// order and hold the same invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLayout {
    /// An ordered map holding only the children that exist.
    Sparse,
    /// A slot for every symbol of the alphabet, allocated with the node.
    ///
    /// Worth it only for small alphabets: every node costs `radix` slots.
    Dense,
}

impl Default for NodeLayout {
    fn default() -> Self {
        NodeLayout::Sparse
    }
}

/// Settings fixed when a trie is created.
///
/// # Examples
///
/// ```
/// use symbol_trie::{Alphabet, NodeLayout, TrieConfig, TrieMap};
///
/// let config = TrieConfig::default()
///     .alphabet(Alphabet::lowercase())
///     .layout(NodeLayout::Dense);
///
/// let mut trie = TrieMap::<u32>::with_config(config);
/// assert!(trie.put("abc", 1).is_ok());
/// assert!(trie.put("ABC", 2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TrieConfig {
    pub(crate) alphabet: Arc<Alphabet>,
    pub(crate) layout: NodeLayout,
}

impl TrieConfig {
    pub fn new() -> Self {
        TrieConfig {
            alphabet: Alphabet::shared_bytes(),
            layout: NodeLayout::default(),
        }
    }

    /// Sets the alphabet keys must be drawn from.
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Arc::new(alphabet);
        self
    }

    /// Sets the child-table layout used for every node.
    pub fn layout(mut self, layout: NodeLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new()
    }
}

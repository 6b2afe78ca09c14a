//! Internal node implementation for the trie.
//!
//! A `TrieNode` is pure storage: an optional value and a table of owned children indexed
//! by alphabet index. The table is either sparse or dense (see [`NodeLayout`]); both keep
//! children in ascending index order.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Enumerate;
use std::slice;

use crate::config::NodeLayout;

/// Internal node type for the trie.
///
/// Each node exclusively owns its children. A node other than the root must carry a value
/// or at least one child; `TrieMap` prunes any node that stops doing so.
#[derive(Debug, Clone)]
pub(crate) struct TrieNode<V> {
    /// The value stored at this node, if some key ends here
    pub value: Option<V>,

    /// Child nodes indexed by alphabet index
    pub children: Children<V>,
}

/// Child table of a node.
#[derive(Debug, Clone)]
pub(crate) enum Children<V> {
    Sparse(BTreeMap<usize, Box<TrieNode<V>>>),
    Dense {
        slots: Box<[Option<Box<TrieNode<V>>>]>,
        occupied: usize,
    },
}

impl<V> TrieNode<V> {
    /// Creates a new empty node using the given layout.
    pub fn new(layout: NodeLayout, radix: usize) -> Self {
        let children = match layout {
            NodeLayout::Sparse => Children::Sparse(BTreeMap::new()),
            NodeLayout::Dense => Children::Dense {
                slots: (0..radix).map(|_| None).collect(),
                occupied: 0,
            },
        };
        TrieNode {
            value: None,
            children,
        }
    }

    /// Returns whether this node is a leaf node (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether this node may be dropped from its parent.
    pub fn is_prunable(&self) -> bool {
        self.value.is_none() && self.is_leaf()
    }

    /// Returns the number of values stored in this subtree
    pub fn subtree_size(&self) -> usize {
        let own = if self.value.is_some() { 1 } else { 0 };
        own + self
            .children
            .iter()
            .map(|(_, child)| child.subtree_size())
            .sum::<usize>()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Audit {
    /// Nodes carrying a value
    pub valued: usize,
    /// Non-root nodes with neither a value nor children
    pub dangling: usize,
    /// Every node, root included
    pub nodes: usize,
}

#[cfg(test)]
impl<V> TrieNode<V> {
    /// Walks the subtree rooted here, treating this node as the root.
    pub fn audit(&self) -> Audit {
        fn walk<V>(node: &TrieNode<V>, is_root: bool, audit: &mut Audit) {
            audit.nodes += 1;
            if node.value.is_some() {
                audit.valued += 1;
            }
            if !is_root && node.is_prunable() {
                audit.dangling += 1;
            }
            for (_, child) in node.children.iter() {
                walk(child, false, audit);
            }
        }

        let mut audit = Audit { valued: 0, dangling: 0, nodes: 0 };
        walk(self, true, &mut audit);
        audit
    }
}

impl<V> Children<V> {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            Children::Sparse(map) => map.len(),
            Children::Dense { occupied, .. } => *occupied,
        }
    }

    pub fn get(&self, index: usize) -> Option<&TrieNode<V>> {
        match self {
            Children::Sparse(map) => map.get(&index).map(|child| &**child),
            Children::Dense { slots, .. } => slots.get(index)?.as_deref(),
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TrieNode<V>> {
        match self {
            Children::Sparse(map) => map.get_mut(&index).map(|child| &mut **child),
            Children::Dense { slots, .. } => slots.get_mut(index)?.as_deref_mut(),
        }
    }

    /// Detaches the child at `index`, handing its ownership to the caller.
    pub fn take(&mut self, index: usize) -> Option<Box<TrieNode<V>>> {
        match self {
            Children::Sparse(map) => map.remove(&index),
            Children::Dense { slots, occupied } => {
                let child = slots.get_mut(index)?.take();
                if child.is_some() {
                    *occupied -= 1;
                }
                child
            }
        }
    }

    /// Attaches `child` at `index`, replacing whatever was there.
    ///
    /// `index` must be below the alphabet radix the table was built for.
    pub fn set(&mut self, index: usize, child: Box<TrieNode<V>>) {
        match self {
            Children::Sparse(map) => {
                map.insert(index, child);
            }
            Children::Dense { slots, occupied } => {
                if slots[index].replace(child).is_none() {
                    *occupied += 1;
                }
            }
        }
    }

    /// Iterates over the existing children in ascending index order.
    pub fn iter(&self) -> ChildIter<'_, V> {
        match self {
            Children::Sparse(map) => ChildIter::Sparse(map.iter()),
            Children::Dense { slots, .. } => ChildIter::Dense(slots.iter().enumerate()),
        }
    }
}

/// Iterator over `(index, child)` pairs of a child table.
pub(crate) enum ChildIter<'a, V> {
    Sparse(btree_map::Iter<'a, usize, Box<TrieNode<V>>>),
    Dense(Enumerate<slice::Iter<'a, Option<Box<TrieNode<V>>>>>),
}

impl<'a, V> Iterator for ChildIter<'a, V> {
    type Item = (usize, &'a TrieNode<V>);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ChildIter::Sparse(iter) => iter.next().map(|(&index, child)| (index, &**child)),
            ChildIter::Dense(iter) => iter.find_map(|(index, slot)| {
                slot.as_deref().map(|child| (index, child))
            }),
        }
    }
}

impl<'a, V> DoubleEndedIterator for ChildIter<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            ChildIter::Sparse(iter) => iter.next_back().map(|(&index, child)| (index, &**child)),
            ChildIter::Dense(iter) => {
                while let Some((index, slot)) = iter.next_back() {
                    if let Some(child) = slot.as_deref() {
                        return Some((index, child));
                    }
                }
                None
            }
        }
    }
}

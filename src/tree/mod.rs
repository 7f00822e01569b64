//! The B+ tree itself: construction, descent, and point lookup.
//!
//! Mutating operations live in the submodules: `insert` (node splits with
//! upward propagation), `delete` (steal/merge rebalancing), and `validate`
//! (the structural invariant checker used by the test suite).

mod delete;
mod insert;
mod validate;

use std::fmt;

use crate::error::{Error, Result};
use crate::node::{Key, Node};

/// An in-memory B+ tree mapping integer keys to string values.
///
/// Every node holds at most `capacity` keys and (apart from the root) at
/// least `capacity / 2`. All leaves sit at the same depth; operations are
/// bounded by tree height, so lookup, insert and delete are `O(log n)`.
///
/// The tree is single-threaded by design: every operation runs to
/// completion before returning, and callers needing concurrent access must
/// serialize mutations externally.
///
/// # Usage
/// ```
/// use bptree::BPlusTree;
///
/// let mut tree = BPlusTree::new(4)?;
/// tree.insert(2, "b".to_string());
/// assert_eq!(tree.lookup(2), Some("b"));
/// assert_eq!(tree.delete(2), Some("b".to_string()));
/// assert_eq!(tree.lookup(2), None);
/// # Ok::<(), bptree::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BPlusTree {
    /// The single owned root node. Replaced in place when a split grows the
    /// tree by one level or a merge collapses it by one.
    root: Node,

    /// Maximum keys per node (even, >= 2; immutable after construction).
    capacity: usize,
}

impl BPlusTree {
    /// Create an empty tree: a single leaf root with no keys.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is odd or smaller than 2.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_root(Node::empty_leaf(), capacity)
    }

    /// Create a tree around an existing root node.
    ///
    /// This is the fixture entry point: tests assemble literal node shapes
    /// with [`Node::leaf`] and [`Node::inner`] and wrap them here. Only the
    /// capacity is checked; use [`BPlusTree::validate`] to verify the shape.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is odd or smaller than 2.
    pub fn with_root(root: Node, capacity: usize) -> Result<Self> {
        if capacity < 2 || capacity % 2 != 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self { root, capacity })
    }

    /// Maximum number of keys a node may hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Minimum number of keys a non-root node must hold.
    pub(crate) fn min_keys(&self) -> usize {
        self.capacity / 2
    }

    /// Read-only access to the root node, for structural inspection
    /// (comparators, printers, the invariant checker in the test suite).
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Replace the root, growing or shrinking the tree by one level.
    pub(crate) fn set_root(&mut self, root: Node) {
        self.root = root;
    }

    /// Look up the value stored under `key`.
    ///
    /// Descends from the root picking the child whose key range covers
    /// `key`, then binary-searches the leaf.
    pub fn lookup(&self, key: Key) -> Option<&str> {
        let mut node = &self.root;
        loop {
            match node {
                Node::Inner { keys, children } => {
                    node = &children[Node::child_index(keys, key)];
                }
                Node::Leaf { keys, values } => {
                    return match keys.binary_search(&key) {
                        Ok(i) => Some(values[i].as_str()),
                        Err(_) => None,
                    };
                }
            }
        }
    }

    /// Number of keys stored in the tree.
    ///
    /// Counted by walking the leaves; the tree keeps no size field.
    pub fn len(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { keys, .. } => keys.len(),
                Node::Inner { children, .. } => children.iter().map(count).sum(),
            }
        }
        count(&self.root)
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for BPlusTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    //! Fixture helpers shared by the unit tests in this module tree.

    use super::*;

    pub(crate) fn leaf(keys: &[Key], values: &[&str]) -> Node {
        Node::leaf(keys.to_vec(), values.iter().map(|s| s.to_string()).collect())
    }

    /// Leaf whose values are the decimal rendering of the keys, the way the
    /// larger fixtures are written.
    pub(crate) fn leaf_n(keys: &[Key]) -> Node {
        let values = keys.iter().map(|k| k.to_string()).collect();
        Node::leaf(keys.to_vec(), values)
    }

    pub(crate) fn tree(root: Node) -> BPlusTree {
        BPlusTree::with_root(root, 4).unwrap()
    }
}

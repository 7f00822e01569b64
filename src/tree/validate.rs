//! Structural invariant checking.
//!
//! This is test tooling, not production error handling: a correct sequence
//! of tree operations can never produce a tree that fails validation, so
//! the test suite calls [`BPlusTree::validate`] after every mutation to
//! catch rebalancing bugs at the operation that introduced them.

use crate::error::{Error, Result};
use crate::node::{Key, Node};
use crate::tree::BPlusTree;

impl BPlusTree {
    /// Walk the whole tree and verify its structural invariants:
    ///
    /// 1. all leaves are at equal depth;
    /// 2. every non-root node holds between `capacity / 2` and `capacity`
    ///    keys (the root is exempt from the minimum, though an inner root
    ///    must keep at least one key);
    /// 3. inner nodes hold exactly one more child than key;
    /// 4. keys within a node are strictly ascending;
    /// 5. every key under `children[i]` is `< keys[i]` and every key under
    ///    `children[j]`, `j > i`, is `>= keys[i]`.
    ///
    /// # Errors
    /// `Error::CorruptTree` describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        check_node(&self.root, true, self.capacity(), None, None)?;
        Ok(())
    }
}

/// Check one node and its subtree; returns the subtree's leaf depth so the
/// caller can compare siblings.
///
/// `lower`/`upper` are the key bounds inherited from ancestor separators:
/// every key in this subtree must satisfy `lower <= key < upper`. The lower
/// bound is inclusive because separators equal the smallest key admitted to
/// the subtree on their right.
fn check_node(
    node: &Node,
    is_root: bool,
    capacity: usize,
    lower: Option<Key>,
    upper: Option<Key>,
) -> Result<usize> {
    let keys = node.keys();

    if keys.len() > capacity {
        return Err(corrupt(format!(
            "node holds {} keys, capacity is {capacity}",
            keys.len()
        )));
    }
    let min_keys = if is_root {
        usize::from(!node.is_leaf())
    } else {
        capacity / 2
    };
    if keys.len() < min_keys {
        return Err(corrupt(format!(
            "node holds {} keys, minimum is {min_keys}",
            keys.len()
        )));
    }

    if !keys.windows(2).all(|w| w[0] < w[1]) {
        return Err(corrupt(format!("keys not strictly ascending: {keys:?}")));
    }
    if let Some(first) = keys.first() {
        if let Some(lo) = lower {
            if *first < lo {
                return Err(corrupt(format!("key {first} below separator bound {lo}")));
            }
        }
    }
    if let Some(last) = keys.last() {
        if let Some(hi) = upper {
            if *last >= hi {
                return Err(corrupt(format!(
                    "key {last} not below separator bound {hi}"
                )));
            }
        }
    }

    match node {
        Node::Leaf { values, .. } => {
            if values.len() != keys.len() {
                return Err(corrupt(format!(
                    "leaf holds {} keys but {} values",
                    keys.len(),
                    values.len()
                )));
            }
            Ok(1)
        }
        Node::Inner { children, .. } => {
            if children.len() != keys.len() + 1 {
                return Err(corrupt(format!(
                    "inner node holds {} keys but {} children",
                    keys.len(),
                    children.len()
                )));
            }
            let mut depth = None;
            for (i, child) in children.iter().enumerate() {
                let child_lower = if i == 0 { lower } else { Some(keys[i - 1]) };
                let child_upper = keys.get(i).copied().or(upper);
                let child_depth = check_node(child, false, capacity, child_lower, child_upper)?;
                match depth {
                    None => depth = Some(child_depth),
                    Some(d) if d != child_depth => {
                        return Err(corrupt(format!(
                            "leaf depth mismatch: {d} vs {child_depth}"
                        )));
                    }
                    Some(_) => {}
                }
            }
            // children is never empty here, so depth is always set
            Ok(depth.unwrap_or(0) + 1)
        }
    }
}

fn corrupt(msg: String) -> Error {
    Error::CorruptTree(msg)
}

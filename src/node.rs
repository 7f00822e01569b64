//! Node model: the tagged Leaf/Inner sum type that makes up the tree.

use std::fmt;

/// Key type stored in the tree.
///
/// Keys are plain integers; values live only at the leaves. The rebalancing
/// logic never looks at values, so widening this to a generic ordered key
/// would touch nothing but type signatures.
pub type Key = i64;

/// A single tree node.
///
/// A node holds between `capacity / 2` and `capacity` keys, sorted ascending
/// with no duplicates. The root is the one exception: a leaf root may hold
/// any number of keys down to zero, an inner root at least one.
///
/// For every inner node the following holds:
/// - all keys reachable under `children[i]` are `< keys[i]`, and
/// - all keys reachable under `children[j]` for `j > i` are `>= keys[i]`.
///
/// Children are owned by value. There are no parent back-references; the
/// ancestry needed during rebalancing is the recursion stack of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf holds the key/value pairs, `values[i]` paired with `keys[i]`.
    Leaf { keys: Vec<Key>, values: Vec<String> },
    /// An inner node routes lookups: always one more child than key.
    Inner { keys: Vec<Key>, children: Vec<Node> },
}

impl Node {
    /// Create a leaf node from parallel key/value sequences.
    ///
    /// Mainly useful for assembling literal tree shapes in tests; the tree
    /// operations build their own nodes.
    ///
    /// # Panics
    /// Panics if `keys` and `values` have different lengths.
    pub fn leaf(keys: Vec<Key>, values: Vec<String>) -> Self {
        assert_eq!(
            keys.len(),
            values.len(),
            "leaf keys and values must be parallel"
        );
        Node::Leaf { keys, values }
    }

    /// Create an inner node from keys and child nodes.
    ///
    /// # Panics
    /// Panics if `children.len() != keys.len() + 1`.
    pub fn inner(keys: Vec<Key>, children: Vec<Node>) -> Self {
        assert_eq!(
            children.len(),
            keys.len() + 1,
            "inner node must have one more child than key"
        );
        Node::Inner { keys, children }
    }

    /// An empty leaf, the root of a freshly constructed tree.
    pub(crate) fn empty_leaf() -> Self {
        Node::Leaf {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// The sorted keys of this node, whichever variant it is.
    pub fn keys(&self) -> &[Key] {
        match self {
            Node::Leaf { keys, .. } => keys,
            Node::Inner { keys, .. } => keys,
        }
    }

    /// Number of keys currently held.
    pub fn key_count(&self) -> usize {
        self.keys().len()
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Index of the child an inner node routes `key` to.
    ///
    /// This is the first index `i` with `keys[i] > key`, or `keys.len()` if
    /// there is none. Equal keys route right, matching the `>=` side of the
    /// inner-node ordering invariant.
    pub(crate) fn child_index(keys: &[Key], key: Key) -> usize {
        keys.partition_point(|&k| k <= key)
    }

    fn fmt_depth(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Node::Leaf { keys, values } => {
                writeln!(f, "{indent}{keys:?} -> {values:?}")
            }
            Node::Inner { keys, children } => {
                writeln!(f, "{indent}{keys:?}")?;
                for child in children {
                    child.fmt_depth(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    /// Indented rendering, one node per line, children below their parent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_depth(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(keys: &[Key], values: &[&str]) -> Node {
        Node::leaf(keys.to_vec(), values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_child_index_routes_ties_right() {
        let keys = [3, 5, 9];
        assert_eq!(Node::child_index(&keys, 1), 0);
        assert_eq!(Node::child_index(&keys, 3), 1); // tie goes right
        assert_eq!(Node::child_index(&keys, 4), 1);
        assert_eq!(Node::child_index(&keys, 9), 3);
        assert_eq!(Node::child_index(&keys, 100), 3);
    }

    #[test]
    fn test_child_index_on_empty_keys() {
        assert_eq!(Node::child_index(&[], 7), 0);
    }

    #[test]
    #[should_panic(expected = "parallel")]
    fn test_leaf_constructor_rejects_mismatched_lengths() {
        Node::leaf(vec![1, 2], vec!["a".to_string()]);
    }

    #[test]
    #[should_panic(expected = "one more child")]
    fn test_inner_constructor_rejects_bad_child_count() {
        Node::inner(vec![3], vec![leaf(&[1], &["a"])]);
    }

    #[test]
    fn test_structural_equality() {
        let a = Node::inner(vec![3], vec![leaf(&[1], &["a"]), leaf(&[3], &["c"])]);
        let b = Node::inner(vec![3], vec![leaf(&[1], &["a"]), leaf(&[3], &["c"])]);
        let c = Node::inner(vec![4], vec![leaf(&[1], &["a"]), leaf(&[4], &["d"])]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_indents_children() {
        let node = Node::inner(vec![3], vec![leaf(&[1], &["a"]), leaf(&[3], &["c"])]);
        let rendered = format!("{}", node);
        assert_eq!(
            rendered,
            "[3]\n  [1] -> [\"a\"]\n  [3] -> [\"c\"]\n"
        );
    }
}

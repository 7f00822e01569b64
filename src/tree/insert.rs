//! Insertion: sorted placement in the target leaf, node splits on overflow,
//! and upward propagation of the split key as the recursion unwinds.

use crate::node::{Key, Node};
use crate::tree::BPlusTree;

/// Outcome of splitting an overflowing node: the key promoted to the parent
/// and the freshly created right sibling. The left half stays in the
/// original node, which the parent already points at.
struct Split {
    key: Key,
    right: Node,
}

impl BPlusTree {
    /// Insert `key` with `value`.
    ///
    /// If the key is already present its value is overwritten in place; the
    /// key keeps its position and no duplicate is created. Otherwise the
    /// pair lands at its sorted position in the covering leaf. A leaf pushed
    /// past capacity splits in two, and the split may cascade through full
    /// ancestors; when it cascades past the root, a new inner root with a
    /// single key takes over and the tree grows one level.
    ///
    /// Insertion never fails.
    pub fn insert(&mut self, key: Key, value: String) {
        let capacity = self.capacity();
        if let Some(split) = insert_into(&mut self.root, key, value, capacity) {
            let left = std::mem::replace(&mut self.root, Node::empty_leaf());
            self.set_root(Node::Inner {
                keys: vec![split.key],
                children: vec![left, split.right],
            });
        }
    }
}

/// Recursive insert. Returns `Some(split)` when `node` had to split and the
/// caller must place the promoted key and new right sibling.
fn insert_into(node: &mut Node, key: Key, value: String, capacity: usize) -> Option<Split> {
    match node {
        Node::Leaf { keys, values } => match keys.binary_search(&key) {
            Ok(i) => {
                // Overwrite policy: existing key keeps its slot.
                values[i] = value;
                None
            }
            Err(i) => {
                keys.insert(i, key);
                values.insert(i, value);
                if keys.len() <= capacity {
                    None
                } else {
                    Some(split_leaf(keys, values))
                }
            }
        },
        Node::Inner { keys, children } => {
            let c = Node::child_index(keys, key);
            let split = insert_into(&mut children[c], key, value, capacity)?;
            // The promoted key separates the old child from its new right
            // sibling, so both slot in directly after the child's position.
            keys.insert(c, split.key);
            children.insert(c + 1, split.right);
            if keys.len() <= capacity {
                None
            } else {
                Some(split_inner(keys, children))
            }
        }
    }
}

/// Split a leaf holding `capacity + 1` entries.
///
/// The left half keeps `(capacity + 1) / 2` entries; the rest move to a new
/// right leaf. The promoted key is the first key of the right half and is
/// *kept* there: leaf splits copy the boundary key up, they do not move it.
fn split_leaf(keys: &mut Vec<Key>, values: &mut Vec<String>) -> Split {
    let mid = keys.len() / 2;
    let right_keys = keys.split_off(mid);
    let right_values = values.split_off(mid);
    Split {
        key: right_keys[0],
        right: Node::Leaf {
            keys: right_keys,
            values: right_values,
        },
    }
}

/// Split an inner node holding `capacity + 1` keys and `capacity + 2`
/// children.
///
/// Unlike a leaf split, the midpoint key is removed from both halves and
/// promoted: the left half keeps keys `[0, mid)` with children
/// `[0, mid]`, the right half keys `(mid, end]` with the remaining
/// children. This arithmetic keeps `children == keys + 1` on both sides
/// for any even capacity.
fn split_inner(keys: &mut Vec<Key>, children: &mut Vec<Node>) -> Split {
    let mid = keys.len() / 2;
    let split_key = keys[mid];
    let right_keys = keys.split_off(mid + 1);
    keys.truncate(mid);
    let right_children = children.split_off(mid + 1);
    debug_assert_eq!(keys.len() + 1, children.len());
    debug_assert_eq!(right_keys.len() + 1, right_children.len());
    Split {
        key: split_key,
        right: Node::Inner {
            keys: right_keys,
            children: right_children,
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::test_util::{leaf, leaf_n, tree};
    use crate::tree::BPlusTree;
    use crate::node::Node;

    #[test]
    fn test_insert_into_leaf_with_space() {
        let mut t = tree(leaf(&[1, 3], &["a", "c"]));
        t.insert(2, "b".to_string());
        assert_eq!(t.root(), &leaf(&[1, 2, 3], &["a", "b", "c"]));
    }

    #[test]
    fn test_insert_into_empty_root() {
        let mut t = BPlusTree::new(4).unwrap();
        t.insert(2, "b".to_string());
        assert_eq!(t.root(), &leaf(&[2], &["b"]));
    }

    #[test]
    fn test_insert_overwrites_existing_key() {
        let mut t = tree(leaf(&[1, 2, 3], &["a", "b", "c"]));
        t.insert(2, "B".to_string());
        assert_eq!(t.root(), &leaf(&[1, 2, 3], &["a", "B", "c"]));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_split_full_leaf_under_inner_root() {
        // Right leaf is full; inserting 7 splits it and the parent absorbs
        // the promoted key 5.
        let mut t = tree(Node::inner(
            vec![3],
            vec![
                leaf(&[1, 2], &["a", "b"]),
                leaf(&[3, 4, 5, 6], &["c", "d", "e", "f"]),
            ],
        ));
        t.insert(7, "g".to_string());
        assert_eq!(
            t.root(),
            &Node::inner(
                vec![3, 5],
                vec![
                    leaf(&[1, 2], &["a", "b"]),
                    leaf(&[3, 4], &["c", "d"]),
                    leaf(&[5, 6, 7], &["e", "f", "g"]),
                ],
            )
        );
        t.validate().unwrap();
    }

    #[test]
    fn test_split_full_leaf_root_grows_tree() {
        let mut t = tree(leaf(&[1, 2, 3, 4], &["a", "b", "c", "d"]));
        t.insert(5, "e".to_string());
        assert_eq!(
            t.root(),
            &Node::inner(
                vec![3],
                vec![
                    leaf(&[1, 2], &["a", "b"]),
                    leaf(&[3, 4, 5], &["c", "d", "e"]),
                ],
            )
        );
        t.validate().unwrap();
    }

    #[test]
    fn test_split_cascades_through_full_parent() {
        // Both the target leaf and its parent are full: the parent splits
        // too, and the grandparent absorbs the promoted key 71.
        let mut t = tree(Node::inner(
            vec![51],
            vec![
                Node::inner(
                    vec![11, 30],
                    vec![leaf_n(&[2, 7]), leaf_n(&[12, 15, 22]), leaf_n(&[35, 41])],
                ),
                Node::inner(
                    vec![63, 66, 71, 78],
                    vec![
                        leaf_n(&[53, 54]),
                        leaf_n(&[63, 64, 65]),
                        leaf_n(&[68, 69]),
                        leaf_n(&[71, 72, 76]),
                        leaf_n(&[79, 84, 93, 94]),
                    ],
                ),
            ],
        ));
        t.insert(95, "95".to_string());
        assert_eq!(
            t.root(),
            &Node::inner(
                vec![51, 71],
                vec![
                    Node::inner(
                        vec![11, 30],
                        vec![leaf_n(&[2, 7]), leaf_n(&[12, 15, 22]), leaf_n(&[35, 41])],
                    ),
                    Node::inner(
                        vec![63, 66],
                        vec![leaf_n(&[53, 54]), leaf_n(&[63, 64, 65]), leaf_n(&[68, 69])],
                    ),
                    Node::inner(
                        vec![78, 93],
                        vec![
                            leaf_n(&[71, 72, 76]),
                            leaf_n(&[79, 84]),
                            leaf_n(&[93, 94, 95]),
                        ],
                    ),
                ],
            )
        );
        t.validate().unwrap();
    }

    #[test]
    fn test_sequential_inserts_keep_invariants() {
        let mut t = BPlusTree::new(4).unwrap();
        for k in 0..200 {
            t.insert(k, k.to_string());
            t.validate().unwrap();
        }
        assert_eq!(t.len(), 200);
        for k in 0..200 {
            assert_eq!(t.lookup(k), Some(k.to_string().as_str()));
        }
    }

    #[test]
    fn test_minimum_capacity_inserts() {
        let mut t = BPlusTree::new(2).unwrap();
        for k in [5, 1, 9, 3, 7, 2, 8] {
            t.insert(k, k.to_string());
            t.validate().unwrap();
        }
        assert_eq!(t.len(), 7);
        assert_eq!(t.lookup(9), Some("9"));
    }
}

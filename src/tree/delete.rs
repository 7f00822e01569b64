//! Deletion: removal from the target leaf and underflow resolution.
//!
//! A node left with fewer than `capacity / 2` keys is repaired by its
//! parent, with a fixed tie-break applied identically at every level:
//! steal from the left sibling, else steal from the right sibling, else
//! merge with the right sibling, else merge with the left. Merging can in
//! turn leave the parent underfull, so the repair recurses toward the root
//! as the call stack unwinds.

use crate::node::{Key, Node};
use crate::tree::BPlusTree;

impl BPlusTree {
    /// Delete `key`, returning the value that was stored under it.
    ///
    /// Returns `None` without mutating anything when the key is absent.
    /// The root is never rebalanced: a leaf root may drain to zero keys,
    /// and an inner root reduced to a single child is replaced by that
    /// child, shrinking the tree by one level.
    pub fn delete(&mut self, key: Key) -> Option<String> {
        let min_keys = self.min_keys();
        let removed = delete_from(&mut self.root, key, min_keys)?;

        // A merge directly below the root may have consumed its last
        // separator; promote the lone remaining child.
        if matches!(&self.root, Node::Inner { keys, .. } if keys.is_empty()) {
            let old_root = std::mem::replace(&mut self.root, Node::empty_leaf());
            if let Node::Inner { mut children, .. } = old_root {
                if let Some(child) = children.pop() {
                    self.set_root(child);
                }
            }
        }
        Some(removed)
    }
}

/// Recursive delete. Removes the key from the covering leaf; on the way
/// back up, each inner node checks whether the child it descended into has
/// gone underfull and repairs it from its siblings.
fn delete_from(node: &mut Node, key: Key, min_keys: usize) -> Option<String> {
    match node {
        Node::Leaf { keys, values } => {
            let i = keys.binary_search(&key).ok()?;
            keys.remove(i);
            Some(values.remove(i))
        }
        Node::Inner { keys, children } => {
            let c = Node::child_index(keys, key);
            let removed = delete_from(&mut children[c], key, min_keys)?;
            if children[c].key_count() < min_keys {
                rebalance(keys, children, c, min_keys);
            }
            Some(removed)
        }
    }
}

/// Repair the underfull child at index `c` using its siblings.
///
/// A sibling qualifies for stealing when it holds strictly more than
/// `min_keys` keys, so giving one up cannot make it underfull itself.
fn rebalance(seps: &mut Vec<Key>, children: &mut Vec<Node>, c: usize, min_keys: usize) {
    if c > 0 && children[c - 1].key_count() > min_keys {
        steal_from_left(seps, children, c);
    } else if c + 1 < children.len() && children[c + 1].key_count() > min_keys {
        steal_from_right(seps, children, c);
    } else if c + 1 < children.len() {
        merge_with_right(seps, children, c);
    } else {
        // c is the last child; fold it into its left sibling instead.
        merge_with_right(seps, children, c - 1);
    }
}

/// Move the boundary entry of the left sibling into the front of the
/// underfull child at `c`.
///
/// For leaves the stolen key itself becomes the new separator. For inner
/// nodes the entry rotates through the parent: the old separator drops into
/// the underfull node and the left sibling's last key replaces it.
fn steal_from_left(seps: &mut [Key], children: &mut [Node], c: usize) {
    let (left_half, right_half) = children.split_at_mut(c);
    let left = &mut left_half[c - 1];
    let node = &mut right_half[0];
    match (left, node) {
        (
            Node::Leaf {
                keys: donor_keys,
                values: donor_values,
            },
            Node::Leaf { keys, values },
        ) => {
            if let (Some(k), Some(v)) = (donor_keys.pop(), donor_values.pop()) {
                keys.insert(0, k);
                values.insert(0, v);
                seps[c - 1] = k;
            }
        }
        (
            Node::Inner {
                keys: donor_keys,
                children: donor_children,
            },
            Node::Inner { keys, children },
        ) => {
            if let (Some(boundary), Some(child)) = (donor_keys.pop(), donor_children.pop()) {
                keys.insert(0, seps[c - 1]);
                children.insert(0, child);
                seps[c - 1] = boundary;
            }
        }
        _ => debug_assert!(false, "siblings at equal depth share a variant"),
    }
}

/// Move the boundary entry of the right sibling into the back of the
/// underfull child at `c`.
///
/// For leaves the right sibling's *new* first key becomes the separator.
/// For inner nodes the old separator drops into the underfull node and the
/// right sibling's first key replaces it in the parent.
fn steal_from_right(seps: &mut [Key], children: &mut [Node], c: usize) {
    let (left_half, right_half) = children.split_at_mut(c + 1);
    let node = &mut left_half[c];
    let right = &mut right_half[0];
    match (node, right) {
        (
            Node::Leaf { keys, values },
            Node::Leaf {
                keys: donor_keys,
                values: donor_values,
            },
        ) => {
            keys.push(donor_keys.remove(0));
            values.push(donor_values.remove(0));
            seps[c] = donor_keys[0];
        }
        (
            Node::Inner { keys, children },
            Node::Inner {
                keys: donor_keys,
                children: donor_children,
            },
        ) => {
            keys.push(seps[c]);
            children.push(donor_children.remove(0));
            seps[c] = donor_keys.remove(0);
        }
        _ => debug_assert!(false, "siblings at equal depth share a variant"),
    }
}

/// Merge the child at `c` with the child at `c + 1`, discarding the right
/// node and the separator between them.
///
/// Leaves concatenate their entries directly. Inner nodes reinsert the old
/// separator between the two key runs, since it still divides their
/// subtrees. The combined node holds at most `capacity` keys because a
/// merge only happens when neither side can spare an entry.
fn merge_with_right(seps: &mut Vec<Key>, children: &mut Vec<Node>, c: usize) {
    let right = children.remove(c + 1);
    let sep = seps.remove(c);
    match (&mut children[c], right) {
        (
            Node::Leaf { keys, values },
            Node::Leaf {
                keys: right_keys,
                values: right_values,
            },
        ) => {
            keys.extend(right_keys);
            values.extend(right_values);
        }
        (
            Node::Inner { keys, children },
            Node::Inner {
                keys: right_keys,
                children: right_children,
            },
        ) => {
            keys.push(sep);
            keys.extend(right_keys);
            children.extend(right_children);
        }
        _ => debug_assert!(false, "siblings at equal depth share a variant"),
    }
}

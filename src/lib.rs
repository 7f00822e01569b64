//! bptree - an in-memory B+ tree mapping integer keys to string values.
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                      BPlusTree                        │
//! │   root: Node ─────────────┐   capacity: usize         │
//! │                           ▼                           │
//! │                 Inner { keys, children }              │
//! │                  ┌────────┴────────┐                  │
//! │                  ▼                 ▼                  │
//! │       Leaf { keys, values }   Leaf { keys, values }   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Every node holds at most `capacity` keys (fixed at construction, even,
//! at least 2) and every non-root node at least `capacity / 2`. All leaves
//! sit at the same depth, so lookup, insert and delete all run in time
//! bounded by the tree height. Overflowing nodes split and promote a key
//! upward; underfull nodes steal from a sibling or merge with one, and the
//! repair propagates toward the root.
//!
//! # Modules
//! - [`node`] - The Leaf/Inner node sum type and its accessors
//! - [`tree`] - The tree: construction, lookup, insert, delete, validation
//! - [`error`] - Unified error type and `Result` alias
//!
//! # Quick Start
//! ```
//! use bptree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(4)?;
//! for (k, v) in [(1, "a"), (2, "b"), (3, "c")] {
//!     tree.insert(k, v.to_string());
//! }
//!
//! assert_eq!(tree.lookup(2), Some("b"));
//! assert_eq!(tree.delete(2), Some("b".to_string()));
//! assert_eq!(tree.lookup(2), None);
//! # Ok::<(), bptree::Error>(())
//! ```

pub mod error;
pub mod node;
pub mod tree;

// Re-export commonly used items at the crate root for convenience
pub use error::{Error, Result};
pub use node::{Key, Node};
pub use tree::BPlusTree;

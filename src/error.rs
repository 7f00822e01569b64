//! Error types for the B+ tree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in this crate.
///
/// Note that a missing key is *not* an error: `lookup` and `delete` report
/// absence through `Option`, since asking for a key that is not there is a
/// perfectly normal outcome.
#[derive(Debug, Error)]
pub enum Error {
    /// The node capacity passed at construction is unusable.
    ///
    /// Capacity must be even (so a full node splits into two legal halves)
    /// and at least 2 (so the minimum fill `capacity / 2` is non-zero).
    #[error("invalid capacity {0}: must be even and at least 2")]
    InvalidCapacity(usize),

    /// A structural invariant does not hold.
    ///
    /// Returned by [`crate::BPlusTree::validate`], which is meant for test
    /// suites and debugging. A correct implementation of the tree operations
    /// never produces a tree that fails validation.
    #[error("corrupt tree: {0}")]
    CorruptTree(String),
}

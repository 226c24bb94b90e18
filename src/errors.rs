//! Error types for the merklized trie
//!
//! Invalid configuration and out-of-range slot access are the only
//! failure modes of the core. Both are reported as named variants so
//! callers can discriminate without string matching. Unknown keys are
//! never errors; lookups model absence as `None`.

use thiserror::Error;

use crate::types::LeafKey;

/// The main error type for the merklized trie
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrieError {
    /// Tree height must be at least 1
    #[error("height of tree must be greater than 0")]
    InvalidTreeHeight,

    /// Leaf byte size must be at least 1
    #[error("bytes of leaf must be greater than 0")]
    InvalidLeafBytes,

    /// Intermediate nodes need at least one slot
    #[error("slots of node must be greater than 0")]
    InvalidSlotCount,

    /// Slot index is outside a node's slot range
    ///
    /// Signals a caller bug rather than a data condition: slot indexes
    /// derived from a leaf key by positional decomposition are always
    /// in range.
    #[error("slot index {index} out of bounds for node with {slots} slots")]
    SlotIndexOutOfBounds {
        /// The offending slot index
        index: usize,
        /// The node's slot count
        slots: usize,
    },

    /// Leaf key does not fit the configured key space
    #[error("leaf key {key} out of bounds for key space of size {bound}")]
    LeafKeyOutOfRange {
        /// The offending leaf key
        key: LeafKey,
        /// The key space size, `branching_factor ^ height`
        bound: LeafKey,
    },

    /// A merkle path level has the wrong byte length
    #[error("merkle path level {level} has {actual} bytes, expected {expected}")]
    MalformedPath {
        /// Zero-based level within the path, counted from the leaf's parent
        level: usize,
        /// Expected byte length, `(slots - 1) * digest_len`
        expected: usize,
        /// Actual byte length of the sibling blob
        actual: usize,
    },
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, TrieError>;

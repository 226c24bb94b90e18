#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Merklized Trie
//!
//! A generalized sparse merkle trie: commits to an arbitrarily sparse
//! set of keyed records with a single root digest and emits compact
//! merkle paths for individual keys, without materializing unused
//! portions of the key space.

// Error types and the crate-wide Result alias
pub mod errors;

// Hash layer: pluggable digest functions and the default composite
pub mod hash;

// Fixed-arity intermediate node
pub mod node;

// Merkle path verification
pub mod proof;

// Trie orchestrator
pub mod trie;

// Shared aliases and the leaf capability contract
pub mod types;

// Re-export commonly used types and functions
pub use errors::{Result, TrieError};
pub use hash::{
    hash160, ripemd160, sha256, Hash160Hasher, Ripemd160Hasher, Sha256Hasher, TrieHasher,
};
pub use node::InterNode;
pub use proof::verify_merkle_path;
pub use trie::{LeafUpdate, MerklizedTrie};
pub use types::{Digest, LeafKey, MerklePath, TrieLeaf};

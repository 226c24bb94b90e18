//! Core type definitions for the merklized trie
//!
//! This module defines the shared aliases and the leaf capability
//! contract that embedding systems implement.

/// A digest produced by a [`TrieHasher`](crate::hash::TrieHasher)
///
/// Length is fixed per hash function (20 bytes for the default
/// composite) but not known to the type system, since the hash layer
/// is pluggable.
pub type Digest = Vec<u8>;

/// Unsigned leaf key, addressed in base `branching_factor`
///
/// 128 bits cover every configuration with
/// `height * log2(branching_factor) <= 128`. Configurations whose key
/// space exceeds that are still usable; the trie simply cannot bound
/// keys it cannot represent.
pub type LeafKey = u128;

/// An ordered merkle path, one sibling blob per tree level
///
/// Entry `i` is the concatenation of the `branching_factor - 1`
/// sibling digests of the leaf's ancestor slot at level `i`, in
/// ascending slot-index order, from the leaf's parent up to the root.
pub type MerklePath = Vec<Digest>;

/// Capability contract for leaf records stored in the trie
///
/// The trie never inspects leaf contents; it only needs a stable key,
/// a fixed-length serialization, and a digest. `hash` is typically the
/// trie's hash function applied to `serialize`, but a leaf is free to
/// define it independently. `serialize` should yield exactly the
/// trie's configured leaf byte length, so that an absent leaf (the
/// digest of an all-zero buffer of that length) and a present leaf
/// hash consistently.
pub trait TrieLeaf {
    /// Returns the leaf's unique unsigned key
    fn key(&self) -> LeafKey;

    /// Returns the leaf's fixed-length byte serialization
    fn serialize(&self) -> Vec<u8>;

    /// Returns the leaf's digest
    fn hash(&self) -> Digest;
}

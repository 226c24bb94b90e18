//! Merkle path verification
//!
//! A merkle path carries one sibling blob per tree level, each the
//! concatenation of `slots - 1` digests. Verification re-inserts the
//! leaf digest into its slot at every level of the base-`slots`
//! decomposition of the key and hashes upward; a path is valid exactly
//! when the fold reproduces the root.

use crate::errors::{Result, TrieError};
use crate::hash::TrieHasher;
use crate::types::{Digest, LeafKey, MerklePath};

/// Verifies a merkle path against a root digest
///
/// Rebuilds each ancestor's serialization by splicing the running
/// digest into the slot selected by the key's base-`slots`
/// decomposition, with the path's sibling digests filling the other
/// slots, then hashes upward. `slots` and `hasher` must match the trie
/// that produced the path.
///
/// # Arguments
/// * `leaf_key` - Key of the leaf the path was derived for
/// * `leaf_hash` - The leaf's digest
/// * `path` - Sibling blobs from the leaf's parent up to the root
/// * `root` - The root digest to check against
/// * `slots` - The trie's branching factor
/// * `hasher` - The trie's hash function
///
/// # Returns
/// `Ok(true)` if the fold reproduces `root`, `Ok(false)` otherwise.
/// Fails with [`TrieError::InvalidSlotCount`] if `slots < 1` and with
/// [`TrieError::MalformedPath`] if a sibling blob's byte length is not
/// `(slots - 1)` times the running digest length.
pub fn verify_merkle_path<H: TrieHasher>(
    leaf_key: LeafKey,
    leaf_hash: &[u8],
    path: &MerklePath,
    root: &[u8],
    slots: usize,
    hasher: &H,
) -> Result<bool> {
    if slots < 1 {
        return Err(TrieError::InvalidSlotCount);
    }

    let mut current: Digest = leaf_hash.to_vec();
    let mut node_key = leaf_key;
    for (level, siblings) in path.iter().enumerate() {
        let digest_len = current.len();
        let expected = (slots - 1) * digest_len;
        if siblings.len() != expected {
            return Err(TrieError::MalformedPath { level, expected, actual: siblings.len() });
        }

        let slot_index = (node_key % slots as LeafKey) as usize;
        let split = slot_index * digest_len;
        let mut serialized = Vec::with_capacity(slots * digest_len);
        serialized.extend_from_slice(&siblings[..split]);
        serialized.extend_from_slice(&current);
        serialized.extend_from_slice(&siblings[split..]);

        current = hasher.digest(&serialized);
        node_key /= slots as LeafKey;
    }

    Ok(current == root)
}

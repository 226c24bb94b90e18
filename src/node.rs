//! Fixed-arity intermediate node
//!
//! An [`InterNode`] aggregates up to `slots` child digests. Only
//! touched slots are stored; unset slots resolve to the node's empty
//! digest, which represents an entirely unpopulated subtree at the
//! node's level.

use std::collections::BTreeMap;

use crate::errors::{Result, TrieError};
use crate::hash::{Hash160Hasher, TrieHasher, DEFAULT_HASHER};
use crate::types::Digest;

/// Intermediate node of the merklized trie
///
/// Holds a sparse slot-index-to-digest mapping. `serialize` always
/// yields exactly `slots` digests of uniform length in ascending slot
/// order, substituting the empty digest for absent slots, so the
/// node's hash is independent of which slots happen to be
/// materialized.
#[derive(Clone, Debug)]
pub struct InterNode<H = Hash160Hasher> {
    /// Number of slots, fixed at construction
    slots: usize,
    /// Digest substituted for any unset slot
    empty_hash: Digest,
    /// Hash function
    hasher: H,
    /// Only touched slots are stored
    slot_hashes: BTreeMap<usize, Digest>,
}

impl InterNode<Hash160Hasher> {
    /// Creates a node with no slots set, using the default hash160 hasher
    ///
    /// Fails with [`TrieError::InvalidSlotCount`] if `slots < 1`.
    pub fn new(slots: usize, empty_hash: Digest) -> Result<Self> {
        Self::with_hasher(slots, empty_hash, DEFAULT_HASHER)
    }
}

impl<H: TrieHasher> InterNode<H> {
    /// Creates a node with no slots set, using a custom hasher
    ///
    /// Fails with [`TrieError::InvalidSlotCount`] if `slots < 1`.
    pub fn with_hasher(slots: usize, empty_hash: Digest, hasher: H) -> Result<Self> {
        if slots < 1 {
            return Err(TrieError::InvalidSlotCount);
        }
        Ok(Self { slots, empty_hash, hasher, slot_hashes: BTreeMap::new() })
    }

    /// Returns the node's slot count
    pub fn slot_count(&self) -> usize {
        self.slots
    }

    /// Sets or overwrites the digest at `index`
    ///
    /// Fails with [`TrieError::SlotIndexOutOfBounds`] if
    /// `index >= slots`. Out-of-range writes would be silently ignored
    /// by `serialize`, so they are rejected instead.
    pub fn set_slot(&mut self, index: usize, digest: Digest) -> Result<()> {
        if index >= self.slots {
            return Err(TrieError::SlotIndexOutOfBounds { index, slots: self.slots });
        }
        self.slot_hashes.insert(index, digest);
        Ok(())
    }

    /// Concatenates all slot digests in ascending index order
    ///
    /// Unset slots contribute the empty digest.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.slots * self.empty_hash.len());
        for index in 0..self.slots {
            out.extend_from_slice(self.slot_digest(index));
        }
        out
    }

    /// Computes the node's digest, `hasher(serialize())`
    pub fn hash(&self) -> Digest {
        self.hasher.digest(&self.serialize())
    }

    /// Concatenates every slot digest except `index`, in ascending order
    ///
    /// This is one level of a merkle path: a path for one slot must
    /// supply the other `slots - 1` digests. Fails with
    /// [`TrieError::SlotIndexOutOfBounds`] if `index >= slots`.
    pub fn slot_siblings(&self, index: usize) -> Result<Vec<u8>> {
        if index >= self.slots {
            return Err(TrieError::SlotIndexOutOfBounds { index, slots: self.slots });
        }
        let mut out = Vec::with_capacity(self.slots.saturating_sub(1) * self.empty_hash.len());
        for slot in (0..self.slots).filter(|&slot| slot != index) {
            out.extend_from_slice(self.slot_digest(slot));
        }
        Ok(out)
    }

    /// Digest stored at `index`, or the empty digest if unset
    fn slot_digest(&self, index: usize) -> &[u8] {
        self.slot_hashes.get(&index).map(|digest| digest.as_slice()).unwrap_or(&self.empty_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{hash160, sha256, Sha256Hasher};

    const EMPTY: [u8; 1] = [0xFF];

    #[test]
    fn test_new_rejects_zero_slots() {
        let result = InterNode::new(0, EMPTY.to_vec());

        assert_eq!(result.err(), Some(TrieError::InvalidSlotCount));
    }

    #[test]
    fn test_serialize() {
        let slots = 5;
        let mut node = InterNode::new(slots, EMPTY.to_vec()).expect("valid slot count");
        let mut expected: Vec<Vec<u8>> = vec![EMPTY.to_vec(); slots];

        assert_eq!(node.serialize(), expected.concat());

        node.set_slot(2, vec![0xAA]).expect("slot 2 is in range");
        expected[2] = vec![0xAA];

        assert_eq!(node.serialize(), expected.concat());
    }

    #[test]
    fn test_hash_with_default_hasher() {
        let slots = 5;
        let mut node = InterNode::new(slots, EMPTY.to_vec()).expect("valid slot count");
        let mut expected: Vec<Vec<u8>> = vec![EMPTY.to_vec(); slots];

        assert_eq!(node.hash(), hash160(&expected.concat()));

        node.set_slot(2, vec![0xAA]).expect("slot 2 is in range");
        expected[2] = vec![0xAA];

        assert_eq!(node.hash(), hash160(&expected.concat()));
    }

    #[test]
    fn test_hash_with_custom_hasher() {
        let slots = 5;
        let mut node =
            InterNode::with_hasher(slots, EMPTY.to_vec(), Sha256Hasher).expect("valid slot count");
        let mut expected: Vec<Vec<u8>> = vec![EMPTY.to_vec(); slots];

        assert_eq!(node.hash(), sha256(&expected.concat()));

        node.set_slot(2, vec![0xAA]).expect("slot 2 is in range");
        expected[2] = vec![0xAA];

        assert_eq!(node.hash(), sha256(&expected.concat()));
    }

    #[test]
    fn test_slot_siblings_excludes_only_the_queried_slot() {
        let mut node = InterNode::new(3, EMPTY.to_vec()).expect("valid slot count");

        // FF FF FF
        assert_eq!(node.slot_siblings(1).expect("in range"), vec![0xFF, 0xFF]);

        node.set_slot(0, vec![0x00]).expect("in range");
        // 00 FF FF
        assert_eq!(node.slot_siblings(1).expect("in range"), vec![0x00, 0xFF]);

        node.set_slot(1, vec![0x01]).expect("in range");
        // 00 01 FF
        assert_eq!(node.slot_siblings(1).expect("in range"), vec![0x00, 0xFF]);

        node.set_slot(2, vec![0x02]).expect("in range");
        // 00 01 02
        assert_eq!(node.slot_siblings(1).expect("in range"), vec![0x00, 0x02]);
    }

    #[test]
    fn test_slot_siblings_rejects_out_of_bounds_index() {
        let node = InterNode::new(3, EMPTY.to_vec()).expect("valid slot count");

        let result = node.slot_siblings(3);

        assert_eq!(result.err(), Some(TrieError::SlotIndexOutOfBounds { index: 3, slots: 3 }));
    }

    #[test]
    fn test_set_slot_rejects_out_of_bounds_index() {
        let mut node = InterNode::new(3, EMPTY.to_vec()).expect("valid slot count");

        let result = node.set_slot(3, vec![0xAA]);

        assert_eq!(result.err(), Some(TrieError::SlotIndexOutOfBounds { index: 3, slots: 3 }));
        assert_eq!(node.serialize(), vec![0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_single_slot_node() {
        let mut node = InterNode::new(1, EMPTY.to_vec()).expect("valid slot count");
        node.set_slot(0, vec![0xAB]).expect("in range");

        assert_eq!(node.serialize(), vec![0xAB]);
        assert_eq!(node.slot_siblings(0).expect("in range"), Vec::<u8>::new());
    }
}

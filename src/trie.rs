//! Sparse merklized trie orchestrator
//!
//! The trie owns the leaf collection, one node-storage map per level,
//! and the precomputed empty-subtree digest for each level. Nodes are
//! addressed by `(level, node key)` instead of parent/child links: for
//! a node key `k`, the parent key is `k / branching_factor` one level
//! up and the slot index within that parent is `k % branching_factor`.
//! Untouched subtrees consume no memory; their digests resolve from
//! the empty-subtree table, so the key domain can be astronomically
//! large while the footprint tracks only populated keys.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::errors::{Result, TrieError};
use crate::hash::{Hash160Hasher, TrieHasher, DEFAULT_HASHER};
use crate::node::InterNode;
use crate::types::{Digest, LeafKey, MerklePath, TrieLeaf};

/// Outcome of an upsert: the displaced leaf and the fresh merkle path
#[derive(Clone, Debug)]
pub struct LeafUpdate<L> {
    /// The leaf previously stored under the key, if any
    pub previous: Option<L>,
    /// The recomputed ancestor-chain path for the upserted leaf
    pub merkle_path: MerklePath,
}

/// Generalized sparse merkle trie over leaves of type `L`
///
/// Produces a single root digest committing to the stored leaf set and
/// emits a compact merkle path for any stored key. Every mutation
/// propagates to the root before returning; the structure is
/// single-writer and fully synchronous.
#[derive(Clone, Debug)]
pub struct MerklizedTrie<L, H = Hash160Hasher> {
    /// Height of the tree
    height: usize,
    /// Serialized byte length of a leaf, used for the empty-leaf digest
    leaf_bytes: usize,
    /// Slot count of every intermediate node (the branching factor)
    slots: usize,
    /// Key space size `slots ^ height`; `None` when it exceeds the key type
    key_bound: Option<LeafKey>,
    /// Most recent leaf per key
    leaves: BTreeMap<LeafKey, L>,
    /// Hash function
    hasher: H,
    /// Empty-subtree digest per level; index 0 is the absent-leaf digest
    empty_hashes: Vec<Digest>,
    /// Intermediate nodes per level, keyed by node key
    levels: Vec<BTreeMap<LeafKey, InterNode<H>>>,
}

impl<L: TrieLeaf> MerklizedTrie<L, Hash160Hasher> {
    /// Creates a trie with the default hash160 hasher
    ///
    /// See [`MerklizedTrie::with_hasher`].
    pub fn new(height: usize, leaf_bytes: usize, slots: usize, leaves: Vec<L>) -> Result<Self> {
        Self::with_hasher(height, leaf_bytes, slots, leaves, DEFAULT_HASHER)
    }
}

impl<L: TrieLeaf, H: TrieHasher + Clone> MerklizedTrie<L, H> {
    /// Creates a trie with a custom hash function
    ///
    /// Precomputes the empty-subtree digest for every level, seeds the
    /// root level with the fully-empty node at key 0, then upserts the
    /// supplied leaves in order (a recurring key keeps its last
    /// occurrence). Construction fails closed: no trie exists on
    /// [`TrieError::InvalidTreeHeight`] (`height < 1`),
    /// [`TrieError::InvalidLeafBytes`] (`leaf_bytes < 1`) or
    /// [`TrieError::InvalidSlotCount`] (`slots < 1`).
    pub fn with_hasher(
        height: usize,
        leaf_bytes: usize,
        slots: usize,
        leaves: Vec<L>,
        hasher: H,
    ) -> Result<Self> {
        if height < 1 {
            return Err(TrieError::InvalidTreeHeight);
        }
        if leaf_bytes < 1 {
            return Err(TrieError::InvalidLeafBytes);
        }

        // empty_hashes[0] commits to an absent leaf; each further level
        // commits to a node fully filled with the level below
        let mut empty_hashes: Vec<Digest> = Vec::with_capacity(height);
        let mut empty_hash = hasher.digest(&vec![0u8; leaf_bytes]);
        for _ in 0..height {
            empty_hashes.push(empty_hash.clone());
            let empty_node = InterNode::with_hasher(slots, empty_hash, hasher.clone())?;
            empty_hash = empty_node.hash();
        }

        let mut levels: Vec<BTreeMap<LeafKey, InterNode<H>>> =
            (0..height).map(|_| BTreeMap::new()).collect();
        let root =
            InterNode::with_hasher(slots, empty_hashes[height - 1].clone(), hasher.clone())?;
        levels[height - 1].insert(0, root);

        let key_bound = u32::try_from(height).ok().and_then(|h| (slots as LeafKey).checked_pow(h));

        let mut trie = Self {
            height,
            leaf_bytes,
            slots,
            key_bound,
            leaves: BTreeMap::new(),
            hasher,
            empty_hashes,
            levels,
        };
        for leaf in leaves {
            trie.upsert_leaf(leaf)?;
        }
        Ok(trie)
    }

    /// Returns the stored leaf for `key`, or `None` if never upserted
    pub fn get_leaf(&self, key: LeafKey) -> Option<&L> {
        self.leaves.get(&key)
    }

    /// Inserts or overwrites a leaf under its own key
    ///
    /// Recomputes the full ancestor chain before returning, so the
    /// root always reflects the stored leaf set. Returns the previous
    /// leaf for the key together with the freshly computed merkle
    /// path. Keys outside the configured key space are rejected with
    /// [`TrieError::LeafKeyOutOfRange`].
    pub fn upsert_leaf(&mut self, leaf: L) -> Result<LeafUpdate<L>> {
        let key = leaf.key();
        if let Some(bound) = self.key_bound {
            if key >= bound {
                return Err(TrieError::LeafKeyOutOfRange { key, bound });
            }
        }
        let leaf_hash = leaf.hash();
        let previous = self.leaves.insert(key, leaf);
        let merkle_path = self.update_ancestors(key, leaf_hash)?;
        Ok(LeafUpdate { previous, merkle_path })
    }

    /// Returns the root digest committing to the stored leaf set
    pub fn merkle_root(&self) -> Digest {
        self.levels[self.height - 1]
            .get(&0)
            .expect("root level holds the node at key 0 after construction")
            .hash()
    }

    /// Returns the merkle path for `key`, or `None` if never upserted
    ///
    /// The path is read off the materialized ancestor chain, which
    /// always holds the current digests for a stored key; no mutation
    /// pass is re-run.
    pub fn merkle_path(&self, key: LeafKey) -> Option<MerklePath> {
        if !self.leaves.contains_key(&key) {
            return None;
        }
        let mut path = MerklePath::with_capacity(self.height);
        let mut node_key = key;
        for level in 0..self.height {
            let parent_key = node_key / self.slots as LeafKey;
            let slot_index = (node_key % self.slots as LeafKey) as usize;
            let parent = self.levels[level].get(&parent_key)?;
            path.push(parent.slot_siblings(slot_index).ok()?);
            node_key = parent_key;
        }
        Some(path)
    }

    /// Returns the height of the tree
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the configured serialized leaf byte length
    pub fn leaf_bytes(&self) -> usize {
        self.leaf_bytes
    }

    /// Returns the branching factor (slot count of every node)
    pub fn branching_factor(&self) -> usize {
        self.slots
    }

    /// Returns the number of stored leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Returns `true` if no leaf has been upserted
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Recomputes the ancestor chain of `leaf_key` bottom-up
    ///
    /// Walks the base-`slots` positional decomposition of the key: at
    /// each level the parent node is fetched or lazily created with
    /// that level's empty digest, the child digest is written into its
    /// slot, and the remaining slots become one level of the returned
    /// path. The last parent visited is the root.
    fn update_ancestors(&mut self, leaf_key: LeafKey, leaf_hash: Digest) -> Result<MerklePath> {
        let mut path = MerklePath::with_capacity(self.height);
        let mut child_hash = leaf_hash;
        let mut node_key = leaf_key;
        for level in 0..self.height {
            let parent_key = node_key / self.slots as LeafKey;
            let slot_index = (node_key % self.slots as LeafKey) as usize;
            let parent = match self.levels[level].entry(parent_key) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(InterNode::with_hasher(
                    self.slots,
                    self.empty_hashes[level].clone(),
                    self.hasher.clone(),
                )?),
            };
            parent.set_slot(slot_index, child_hash)?;
            path.push(parent.slot_siblings(slot_index)?);
            child_hash = parent.hash();
            node_key = parent_key;
        }
        Ok(path)
    }
}

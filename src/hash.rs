//! Hash layer: the pluggable digest function and the default composite
//!
//! The default digest is `hash160`, RIPEMD-160 over SHA-256, chosen for
//! its short fixed-size output. Both constituents are exposed so
//! callers can assemble a different composite. Every hash function
//! must be deterministic with bitwise-identical output across
//! platforms; root determinism and path verifiability depend on it.

use ripemd::Ripemd160;
use sha2::{Digest as _, Sha256};

use crate::types::Digest;

/// Trait for hash functions used in trie operations
///
/// Maps a byte buffer to a fixed-length byte buffer, deterministically,
/// with no side effects and no failure mode for valid input. The trie
/// and its intermediate nodes accept any implementation at
/// construction and hold it for their lifetime; swapping the hash
/// function mid-lifetime would desynchronize precomputed empty-subtree
/// digests from live nodes, so no such operation exists.
pub trait TrieHasher {
    /// Computes the digest of `payload`
    fn digest(&self, payload: &[u8]) -> Digest;
}

/// Computes the SHA-256 digest of `payload` (32 bytes)
pub fn sha256(payload: &[u8]) -> Digest {
    Sha256::digest(payload).to_vec()
}

/// Computes the RIPEMD-160 digest of `payload` (20 bytes)
pub fn ripemd160(payload: &[u8]) -> Digest {
    Ripemd160::digest(payload).to_vec()
}

/// Computes `ripemd160(sha256(payload))` (20 bytes)
pub fn hash160(payload: &[u8]) -> Digest {
    ripemd160(&sha256(payload))
}

/// [`TrieHasher`] implementation for the `hash160` composite
///
/// This is the default hash function of the trie.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hash160Hasher;

impl TrieHasher for Hash160Hasher {
    fn digest(&self, payload: &[u8]) -> Digest { hash160(payload) }
}

/// [`TrieHasher`] implementation for plain SHA-256
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl TrieHasher for Sha256Hasher {
    fn digest(&self, payload: &[u8]) -> Digest { sha256(payload) }
}

/// [`TrieHasher`] implementation for plain RIPEMD-160
#[derive(Clone, Copy, Debug, Default)]
pub struct Ripemd160Hasher;

impl TrieHasher for Ripemd160Hasher {
    fn digest(&self, payload: &[u8]) -> Digest { ripemd160(payload) }
}

/// Default hasher instance (hash160 composite)
pub(crate) const DEFAULT_HASHER: Hash160Hasher = Hash160Hasher;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash160_vector() {
        let payload = b"Hello, World!";
        let expected =
            hex::decode("e3c83f9d9adb8fcbccc4399da8ebe609ba4352e4").expect("valid hex literal");

        assert_eq!(hash160(payload), expected);
    }

    #[test]
    fn test_hash160_is_composite() {
        let payload = b"composite check";

        assert_eq!(hash160(payload), ripemd160(&sha256(payload)));
    }

    #[test]
    fn test_output_lengths() {
        assert_eq!(sha256(b"").len(), 32);
        assert_eq!(ripemd160(b"").len(), 20);
        assert_eq!(hash160(b"").len(), 20);
    }

    #[test]
    fn test_hasher_trait_matches_free_functions() {
        let payload = b"trait dispatch";

        assert_eq!(Hash160Hasher.digest(payload), hash160(payload));
        assert_eq!(Sha256Hasher.digest(payload), sha256(payload));
        assert_eq!(Ripemd160Hasher.digest(payload), ripemd160(payload));
    }

    #[test]
    fn test_determinism() {
        let payload = b"same input, same digest";

        assert_eq!(hash160(payload), hash160(payload));
        assert_ne!(hash160(payload), hash160(b"different input"));
    }
}

//! Poseidon Hashing over BN254
//!
//! # Hash Function Architecture
//!
//! Two hash functions are in play and must not be confused:
//! - Keccak256 (see [`crate::crypto::keccak`]) truncates arbitrary bytes into
//!   the field: pubkeys, address seeds.
//! - Poseidon hashes values that are *already* field elements: compressed
//!   account leaves and Merkle tree nodes. The proof circuit recomputes these.
//!
//! Parameters are circom-compatible (`light-poseidon`):
//! - Field: BN254 scalar field
//! - Width: t = inputs + 1
//! - Encoding: 32-byte big-endian inputs and output
//!
//! Every input must be a canonical field element; anything else is rejected
//! rather than reduced.

use anchor_lang::prelude::*;
use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonBytesHasher};

use crate::error::CompressionError;

/// Poseidon hash of up to 12 big-endian field elements.
///
/// # Errors
/// * `PoseidonHashFailed` - no inputs, too many inputs, or an input that is
///   not a 32-byte-or-shorter value below the modulus
pub fn hashv(inputs: &[&[u8]]) -> Result<[u8; 32]> {
    require!(!inputs.is_empty(), CompressionError::PoseidonHashFailed);
    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len())
        .map_err(|_| error!(CompressionError::PoseidonHashFailed))?;
    hasher
        .hash_bytes_be(inputs)
        .map_err(|_| error!(CompressionError::PoseidonHashFailed))
}

/// Hash two 32-byte values for Merkle tree internal nodes.
///
/// # Returns
/// Parent node hash: Poseidon(left, right)
pub fn hash_two_to_one(left: &[u8; 32], right: &[u8; 32]) -> Result<[u8; 32]> {
    hashv(&[left.as_slice(), right.as_slice()])
}

/// Empty leaf hash (all zeros).
#[inline]
pub fn empty_leaf_hash() -> [u8; 32] {
    [0u8; 32]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIELD_SIZE_BE;

    #[test]
    fn test_hash_two_to_one_deterministic() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        let h1 = hash_two_to_one(&left, &right).unwrap();
        let h2 = hash_two_to_one(&left, &right).unwrap();
        assert_eq!(h1, h2, "Hash should be deterministic");
    }

    #[test]
    fn test_hash_two_to_one_non_commutative() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        let h1 = hash_two_to_one(&a, &b).unwrap();
        let h2 = hash_two_to_one(&b, &a).unwrap();
        assert_ne!(h1, h2, "Hash should not be commutative");
    }

    #[test]
    fn test_known_zero_pair() {
        // Poseidon(0, 0) with circom parameters, the level-1 zero of every tree
        let hash = hash_two_to_one(&empty_leaf_hash(), &empty_leaf_hash()).unwrap();
        assert_eq!(
            hex::encode(hash),
            "2098f5fb9e239eab3ceac3f27b81e481dc3124d55ffed523a839ee8446b64864"
        );
    }

    #[test]
    fn test_rejects_non_field_input() {
        assert!(hash_two_to_one(&FIELD_SIZE_BE, &[0u8; 32]).is_err());
        assert!(hash_two_to_one(&[0xffu8; 32], &[0u8; 32]).is_err());
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(hashv(&[]).is_err());
    }

    #[test]
    fn test_arity_changes_hash() {
        let one = [1u8; 32];
        let h1 = hashv(&[&one]).unwrap();
        let h2 = hashv(&[&one, &one]).unwrap();
        assert_ne!(h1, h2);
    }
}

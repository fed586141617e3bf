//! Keccak256 Hash-to-Field
//!
//! Maps arbitrary byte sequences into the BN254 scalar field by hashing with
//! Keccak256 and zeroing the most significant byte of the big-endian digest.
//! A zero top byte leaves at most 248 bits, which is always below the ~254-bit
//! modulus, so the output is field-valid without any modular reduction.
//!
//! ```text
//! hash          = Keccak256(input_0 || input_1 || ... )
//! hash_with_bump = Keccak256(input_0 || input_1 || ... || 0xff)
//! result[0]     = 0
//! ```
//!
//! Keccak256 is used because it is available as a Solana syscall, so the
//! on-chain verifier recomputes the same digests cheaply.

use solana_program::keccak;
use tracing::warn;

use crate::constants::HASH_TO_FIELD_SIZE_SEED;
use crate::crypto::field::is_smaller_than_field_size;

/// Hash the ordered concatenation of `inputs` into a field-sized value.
pub fn hashv_to_field_size_be(inputs: &[&[u8]]) -> [u8; 32] {
    let mut hash = keccak::hashv(inputs).to_bytes();
    hash[0] = 0;
    hash
}

/// Hash a single byte sequence into a field-sized value.
#[inline]
pub fn hash_to_field_size_be(bytes: &[u8]) -> [u8; 32] {
    hashv_to_field_size_be(&[bytes])
}

/// Single-input form of [`hashv_to_field_size_be_with_bump`].
///
/// Pubkeys entering a compressed account leaf hash (owner, tree) are truncated
/// with this function.
#[inline]
pub fn hash_to_field_size_be_with_bump(bytes: &[u8]) -> [u8; 32] {
    hashv_to_field_size_be_with_bump(&[bytes])
}

/// Like [`hashv_to_field_size_be`] with the fixed `0xff` suffix appended.
///
/// The on-chain verifier of V2 addresses expects exactly this suffix.
pub fn hashv_to_field_size_be_with_bump(inputs: &[&[u8]]) -> [u8; 32] {
    let bump_seed = [HASH_TO_FIELD_SIZE_SEED];
    let mut slices: Vec<&[u8]> = Vec::with_capacity(inputs.len() + 1);
    slices.extend_from_slice(inputs);
    slices.push(&bump_seed);
    hashv_to_field_size_be(&slices)
}

/// Legacy: search a trailing bump byte from 255 down to 0.
///
/// For each candidate, hashes `bytes || candidate`, zeroes the top byte and
/// accepts the first result that passes [`is_smaller_than_field_size`].
///
/// # Returns
/// The accepted hash and its bump, or `None` if every candidate failed.
#[deprecated(note = "Use hashv_to_field_size_be_with_bump; kept for V1 address compatibility")]
pub fn hash_to_field_size_be_with_bump_search(bytes: &[u8]) -> Option<([u8; 32], u8)> {
    for bump in (0..=u8::MAX).rev() {
        let hash = hashv_to_field_size_be(&[bytes, &[bump]]);
        if is_smaller_than_field_size(&hash) {
            return Some((hash, bump));
        }
    }
    warn!(input_len = bytes.len(), "bump search exhausted all candidates");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_vector() {
        // Keccak256("") = c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470
        let hash = hashv_to_field_size_be(&[]);
        assert_eq!(
            hex::encode(hash),
            "00d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_deterministic() {
        let h1 = hash_to_field_size_be(b"compressed");
        let h2 = hash_to_field_size_be(b"compressed");
        assert_eq!(h1, h2, "Hash should be deterministic");
    }

    #[test]
    fn test_top_byte_zeroed() {
        for i in 0..32u8 {
            assert_eq!(hash_to_field_size_be(&[i; 7])[0], 0);
            assert_eq!(hashv_to_field_size_be_with_bump(&[&[i; 7]])[0], 0);
        }
    }

    #[test]
    fn test_concatenation_boundary_irrelevant() {
        // Inputs are concatenated before hashing
        let split = hashv_to_field_size_be(&[b"ab", b"c"]);
        let joined = hashv_to_field_size_be(&[b"abc"]);
        assert_eq!(split, joined);
    }

    #[test]
    fn test_order_sensitive() {
        let h1 = hashv_to_field_size_be(&[b"a", b"b"]);
        let h2 = hashv_to_field_size_be(&[b"b", b"a"]);
        assert_ne!(h1, h2, "Hash should not be commutative");
    }

    #[test]
    fn test_bump_variant_differs() {
        let input: &[u8] = &[7u8; 32];
        assert_ne!(
            hashv_to_field_size_be(&[input]),
            hashv_to_field_size_be_with_bump(&[input])
        );
    }

    #[test]
    fn test_bump_variant_is_explicit_suffix() {
        let input: &[u8] = &[7u8; 32];
        assert_eq!(
            hashv_to_field_size_be_with_bump(&[input]),
            hashv_to_field_size_be(&[input, &[255u8]])
        );
    }

    #[test]
    fn test_bump_single_input_vector() {
        // Keccak256([3; 32] || 0xff) with the top byte zeroed
        assert_eq!(
            hex::encode(hash_to_field_size_be_with_bump(&[3u8; 32])),
            "0012c5848527b6cec3b83f505af48c7b5ea6370c340b03232f99c5a1b8e80cb5"
        );
        assert_eq!(
            hex::encode(hash_to_field_size_be(&[3u8; 32])),
            "007a4de37def8e10861261f58e1003e6086df449b615bb411c39669548e19dba"
        );
    }

    #[test]
    #[allow(deprecated)]
    fn test_bump_search_accepts_first_candidate() {
        // With the top byte zeroed every candidate is field-valid, so 255 wins.
        let (hash, bump) = hash_to_field_size_be_with_bump_search(b"seed").unwrap();
        assert_eq!(bump, 255);
        assert_eq!(hash, hashv_to_field_size_be_with_bump(&[b"seed"]));
        assert!(is_smaller_than_field_size(&hash));
    }
}

//! Address Derivation
//!
//! Compressed accounts may carry a persistent 32-byte address, derived
//! deterministically from caller seeds. Two protocol versions coexist and are
//! separate address spaces on-chain; never mix them for one logical entity.
//!
//! # V1
//! ```text
//! seed    = KeccakField(program_id || seeds...)
//! address = KeccakField(address_tree || seed || bump)   bump searched 255 -> 0
//! ```
//!
//! # V2
//! ```text
//! seed    = KeccakField(seeds... || 0xff)
//! address = KeccakField(seed || address_tree || program_id || 0xff)
//! ```
//! V2 seeds carry no program id; domain separation happens when the address
//! is bound to its tree and program.

use anchor_lang::prelude::*;

#[allow(deprecated)]
use crate::crypto::keccak::hash_to_field_size_be_with_bump_search;
use crate::crypto::keccak::{hashv_to_field_size_be, hashv_to_field_size_be_with_bump};
use crate::constants::HASH_LEN;
use crate::error::CompressionError;

/// Address derivation protocol version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressVersion {
    V1,
    V2,
}

impl Default for AddressVersion {
    fn default() -> Self {
        if cfg!(feature = "v2") {
            AddressVersion::V2
        } else {
            AddressVersion::V1
        }
    }
}

impl AddressVersion {
    /// Derive seed and address in one step for this version.
    pub fn derive(
        self,
        seeds: &[&[u8]],
        address_tree: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<[u8; 32]> {
        match self {
            AddressVersion::V1 => {
                let seed = derive_address_seed(seeds, program_id);
                derive_address(&seed, address_tree).map(|address| address.to_bytes())
            }
            AddressVersion::V2 => {
                let seed = derive_address_seed_v2(seeds);
                derive_address_v2(&seed, address_tree, program_id)
            }
        }
    }
}

// ============================================================================
// V1
// ============================================================================

/// Derive a V1 address seed bound to `program_id`.
pub fn derive_address_seed(seeds: &[&[u8]], program_id: &Pubkey) -> [u8; 32] {
    let mut inputs: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
    inputs.push(program_id.as_ref());
    inputs.extend_from_slice(seeds);
    hashv_to_field_size_be(&inputs)
}

/// Derive a V1 address from a 32-byte seed within `address_tree`.
///
/// # Errors
/// * `InvalidSeedLength` - seed is not 32 bytes
/// * `AddressDerivationFailed` - bump search found no valid candidate
pub fn derive_address(seed: &[u8], address_tree: &Pubkey) -> Result<Pubkey> {
    require!(seed.len() == HASH_LEN, CompressionError::InvalidSeedLength);

    let mut input = Vec::with_capacity(HASH_LEN * 2);
    input.extend_from_slice(address_tree.as_ref());
    input.extend_from_slice(seed);

    #[allow(deprecated)]
    let (hash, _bump) = hash_to_field_size_be_with_bump_search(&input)
        .ok_or_else(|| error!(CompressionError::AddressDerivationFailed))?;
    Ok(Pubkey::new_from_array(hash))
}

// ============================================================================
// V2
// ============================================================================

/// Derive a V2 address seed (no program id).
pub fn derive_address_seed_v2(seeds: &[&[u8]]) -> [u8; 32] {
    hashv_to_field_size_be_with_bump(seeds)
}

/// Derive a V2 address bound to `address_tree` and `program_id`.
///
/// # Errors
/// * `InvalidSeedLength` - seed is not 32 bytes
pub fn derive_address_v2(
    seed: &[u8],
    address_tree: &Pubkey,
    program_id: &Pubkey,
) -> Result<[u8; 32]> {
    require!(seed.len() == HASH_LEN, CompressionError::InvalidSeedLength);
    Ok(hashv_to_field_size_be_with_bump(&[
        seed,
        address_tree.as_ref(),
        program_id.as_ref(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ADDRESS_TREE_V1, ADDRESS_TREE_V2};
    use crate::crypto::field::is_smaller_than_field_size;

    fn program() -> Pubkey {
        Pubkey::new_from_array([9u8; 32])
    }

    #[test]
    fn test_v1_and_v2_seeds_differ() {
        let seeds: &[&[u8]] = &[b"counter", &[1u8; 32]];
        assert_ne!(derive_address_seed(seeds, &program()), derive_address_seed_v2(seeds));
    }

    #[test]
    fn test_v1_seed_bound_to_program() {
        let seeds: &[&[u8]] = &[b"counter"];
        let other = Pubkey::new_from_array([8u8; 32]);
        assert_ne!(
            derive_address_seed(seeds, &program()),
            derive_address_seed(seeds, &other)
        );
    }

    #[test]
    fn test_seed_length_enforced() {
        for len in [0usize, 31, 33] {
            let seed = vec![1u8; len];
            assert!(derive_address(&seed, &ADDRESS_TREE_V1).is_err());
            assert!(derive_address_v2(&seed, &ADDRESS_TREE_V2, &program()).is_err());
        }
    }

    #[test]
    fn test_seed_length_error_kind() {
        let err = derive_address(&[0u8; 31], &ADDRESS_TREE_V1).unwrap_err();
        assert_eq!(err, CompressionError::InvalidSeedLength.into());
    }

    #[test]
    fn test_v1_address_is_field_valid() {
        let seed = derive_address_seed(&[b"seed"], &program());
        let address = derive_address(&seed, &ADDRESS_TREE_V1).unwrap();
        assert!(is_smaller_than_field_size(&address.to_bytes()));
        assert_eq!(address, derive_address(&seed, &ADDRESS_TREE_V1).unwrap());
    }

    #[test]
    fn test_v1_address_bound_to_tree() {
        let seed = derive_address_seed(&[b"seed"], &program());
        assert_ne!(
            derive_address(&seed, &ADDRESS_TREE_V1).unwrap(),
            derive_address(&seed, &ADDRESS_TREE_V2).unwrap()
        );
    }

    #[test]
    fn test_v2_address_bound_to_tree_and_program() {
        let seed = derive_address_seed_v2(&[b"seed"]);
        let base = derive_address_v2(&seed, &ADDRESS_TREE_V2, &program()).unwrap();
        let other_tree = derive_address_v2(&seed, &ADDRESS_TREE_V1, &program()).unwrap();
        let other_program =
            derive_address_v2(&seed, &ADDRESS_TREE_V2, &Pubkey::new_from_array([8u8; 32]))
                .unwrap();
        assert_ne!(base, other_tree);
        assert_ne!(base, other_program);
        assert_eq!(base[0], 0);
    }

    #[test]
    fn test_versions_produce_different_addresses() {
        let seeds: &[&[u8]] = &[b"seed"];
        let v1 = AddressVersion::V1.derive(seeds, &ADDRESS_TREE_V2, &program()).unwrap();
        let v2 = AddressVersion::V2.derive(seeds, &ADDRESS_TREE_V2, &program()).unwrap();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_version_dispatch_matches_direct_calls() {
        let seeds: &[&[u8]] = &[b"seed"];
        let seed = derive_address_seed_v2(seeds);
        let direct = derive_address_v2(&seed, &ADDRESS_TREE_V2, &program()).unwrap();
        let dispatched = AddressVersion::V2.derive(seeds, &ADDRESS_TREE_V2, &program()).unwrap();
        assert_eq!(direct, dispatched);
    }
}

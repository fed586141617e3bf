//! Validity proofs
//!
//! A validity proof is a compressed Groth16 proof over BN254 showing that
//! input leaves exist in their trees and that new addresses do not yet exist
//! in theirs.
//!
//! # Compressed Layout (128 bytes)
//! ```text
//! a: G1, compressed (32 bytes)
//! b: G2, compressed (64 bytes)
//! c: G1, compressed (32 bytes)
//! ```
//!
//! Leaves still sitting in a batched output queue can be proven by index; if
//! every input is provable by index and no address is created, the proof is
//! omitted entirely.

use anchor_lang::prelude::*;

use crate::crypto::field::FieldElement;
use crate::error::CompressionError;
use crate::state::tree_info::TreeInfo;

/// Expected compressed proof length
pub const COMPRESSED_PROOF_LEN: usize = 128;

/// Compressed Groth16 proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct ValidityProof {
    /// Point A ∈ G1 (compressed, 32 bytes)
    pub a: [u8; 32],

    /// Point B ∈ G2 (compressed, 64 bytes)
    pub b: [u8; 64],

    /// Point C ∈ G1 (compressed, 32 bytes)
    pub c: [u8; 32],
}

impl ValidityProof {
    /// Parse proof from raw bytes.
    ///
    /// # Errors
    /// * `InvalidLength` - data is not exactly 128 bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        require!(
            data.len() == COMPRESSED_PROOF_LEN,
            CompressionError::InvalidLength
        );

        let mut proof = ValidityProof {
            a: [0u8; 32],
            b: [0u8; 64],
            c: [0u8; 32],
        };

        proof.a.copy_from_slice(&data[0..32]);
        proof.b.copy_from_slice(&data[32..96]);
        proof.c.copy_from_slice(&data[96..128]);

        Ok(proof)
    }

    /// Build from separately transmitted points.
    pub fn from_parts(a: &[u8], b: &[u8], c: &[u8]) -> Result<Self> {
        Ok(ValidityProof {
            a: a.try_into().map_err(|_| error!(CompressionError::InvalidLength))?,
            b: b.try_into().map_err(|_| error!(CompressionError::InvalidLength))?,
            c: c.try_into().map_err(|_| error!(CompressionError::InvalidLength))?,
        })
    }

    /// Serialize proof to bytes.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_PROOF_LEN] {
        let mut bytes = [0u8; COMPRESSED_PROOF_LEN];
        bytes[0..32].copy_from_slice(&self.a);
        bytes[32..96].copy_from_slice(&self.b);
        bytes[96..128].copy_from_slice(&self.c);
        bytes
    }
}

/// Proof inputs for one existing leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountProofInputs {
    pub hash: FieldElement,
    pub root: FieldElement,
    /// Index of `root` in the tree's on-chain root history
    pub root_index: u16,
    pub leaf_index: u32,
    pub tree_info: TreeInfo,
    pub prove_by_index: bool,
}

/// Proof inputs for one new address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressProofInputs {
    pub address: [u8; 32],
    pub root: FieldElement,
    pub root_index: u16,
    pub tree_info: TreeInfo,
}

/// A proof with the per-leaf and per-address context the instruction needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidityProofWithContext {
    pub proof: Option<ValidityProof>,
    pub accounts: Vec<AccountProofInputs>,
    pub addresses: Vec<AddressProofInputs>,
}

impl ValidityProofWithContext {
    /// Whether any input needs the zk proof (vs. proof-by-index).
    pub fn is_proof_required(&self) -> bool {
        !self.addresses.is_empty() || self.accounts.iter().any(|a| !a.prove_by_index)
    }

    /// Reject a missing proof when one is required.
    pub fn validate(&self) -> Result<()> {
        require!(
            self.proof.is_some() || !self.is_proof_required(),
            CompressionError::MissingValidityProof
        );
        Ok(())
    }

    pub fn root_indices(&self) -> Vec<u16> {
        self.accounts.iter().map(|a| a.root_index).collect()
    }

    pub fn address_root_indices(&self) -> Vec<u16> {
        self.addresses.iter().map(|a| a.root_index).collect()
    }

    pub fn roots(&self) -> Vec<FieldElement> {
        self.accounts.iter().map(|a| a.root.clone()).collect()
    }

    pub fn leaf_indices(&self) -> Vec<u32> {
        self.accounts.iter().map(|a| a.leaf_index).collect()
    }

    pub fn leaves(&self) -> Vec<FieldElement> {
        self.accounts.iter().map(|a| a.hash.clone()).collect()
    }

    pub fn tree_infos(&self) -> Vec<TreeInfo> {
        self.accounts.iter().map(|a| a.tree_info.clone()).collect()
    }

    pub fn prove_by_indices(&self) -> Vec<bool> {
        self.accounts.iter().map(|a| a.prove_by_index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tree_info::TreeType;

    fn account_inputs(prove_by_index: bool) -> AccountProofInputs {
        AccountProofInputs {
            hash: FieldElement::from(1),
            root: FieldElement::from(2),
            root_index: 3,
            leaf_index: 4,
            tree_info: TreeInfo::new(
                Pubkey::new_from_array([1u8; 32]),
                Pubkey::new_from_array([2u8; 32]),
                TreeType::StateV2,
            ),
            prove_by_index,
        }
    }

    #[test]
    fn test_proof_parsing() {
        let mut data = [0u8; COMPRESSED_PROOF_LEN];
        // Set distinct patterns for A, B, C
        data[0..32].fill(0x01);
        data[32..96].fill(0x02);
        data[96..128].fill(0x03);

        let proof = ValidityProof::from_bytes(&data).unwrap();

        assert!(proof.a.iter().all(|&b| b == 0x01));
        assert!(proof.b.iter().all(|&b| b == 0x02));
        assert!(proof.c.iter().all(|&b| b == 0x03));
        assert_eq!(proof.to_bytes(), data);
    }

    #[test]
    fn test_proof_invalid_length() {
        assert!(ValidityProof::from_bytes(&[0u8; 127]).is_err());
        assert!(ValidityProof::from_bytes(&[0u8; 129]).is_err());
    }

    #[test]
    fn test_from_parts_lengths() {
        assert!(ValidityProof::from_parts(&[0u8; 32], &[0u8; 64], &[0u8; 32]).is_ok());
        assert!(ValidityProof::from_parts(&[0u8; 32], &[0u8; 32], &[0u8; 32]).is_err());
    }

    #[test]
    fn test_borsh_matches_raw_layout() {
        let proof = ValidityProof::from_bytes(&[7u8; COMPRESSED_PROOF_LEN]).unwrap();
        assert_eq!(proof.try_to_vec().unwrap(), proof.to_bytes().to_vec());
    }

    #[test]
    fn test_proof_optional_when_all_by_index() {
        let context = ValidityProofWithContext {
            proof: None,
            accounts: vec![account_inputs(true), account_inputs(true)],
            addresses: vec![],
        };
        assert!(!context.is_proof_required());
        assert!(context.validate().is_ok());
    }

    #[test]
    fn test_proof_required_for_full_proof_leaf() {
        let context = ValidityProofWithContext {
            proof: None,
            accounts: vec![account_inputs(true), account_inputs(false)],
            addresses: vec![],
        };
        assert!(context.is_proof_required());
        assert!(context.validate().is_err());
    }

    #[test]
    fn test_accessors_parallel() {
        let context = ValidityProofWithContext {
            proof: None,
            accounts: vec![account_inputs(true)],
            addresses: vec![],
        };
        assert_eq!(context.root_indices(), vec![3]);
        assert_eq!(context.leaf_indices(), vec![4]);
        assert_eq!(context.leaves(), vec![FieldElement::from(1)]);
        assert_eq!(context.roots(), vec![FieldElement::from(2)]);
        assert_eq!(context.prove_by_indices(), vec![true]);
        assert_eq!(context.tree_infos().len(), 1);
    }
}

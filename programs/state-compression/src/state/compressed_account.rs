//! Compressed accounts and their Merkle context
//!
//! A compressed account is never stored on-chain as an account. Only its hash
//! is committed as a leaf of a state tree; the full record is served by the
//! indexer and re-hashed by the verifier.
//!
//! # Leaf Hash
//! ```text
//! leaf = Poseidon(
//!     KeccakField(owner || 0xff),
//!     leaf_index,                      // 32 bytes, last 4: LE (V1) or BE (batched)
//!     KeccakField(merkle_tree || 0xff),
//!     [.. 1 || lamports_be],           // only if lamports != 0
//!     address,                         // only if present
//!     [.. 2 || discriminator],         // only if data present
//!     data_hash,                       // only if data present
//! )
//! ```
//! The domain bytes (1, 2) sit at offset 23 and keep the optional inputs from
//! aliasing one another.

use anchor_lang::prelude::*;

use crate::constants::{DISCRIMINATOR_DOMAIN, HASH_LEN, LAMPORTS_DOMAIN};
use crate::crypto::field::FieldElement;
use crate::crypto::keccak::{hash_to_field_size_be, hash_to_field_size_be_with_bump};
use crate::crypto::poseidon;
use crate::state::tree_info::TreeInfo;

/// Program-defined payload of a compressed account.
#[derive(Clone, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct CompressedAccountData {
    pub discriminator: [u8; 8],
    pub data: Vec<u8>,
    pub data_hash: [u8; 32],
}

impl CompressedAccountData {
    /// Build data whose hash is the Keccak field truncation of `data`.
    pub fn new(discriminator: [u8; 8], data: Vec<u8>) -> Self {
        let data_hash = hash_to_field_size_be(&data);
        Self {
            discriminator,
            data,
            data_hash,
        }
    }
}

/// Logical compressed account record.
#[derive(Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct CompressedAccount {
    pub owner: Pubkey,
    pub lamports: u64,
    pub address: Option<[u8; 32]>,
    pub data: Option<CompressedAccountData>,
}

impl CompressedAccount {
    pub fn new(owner: Pubkey, lamports: u64) -> Self {
        Self {
            owner,
            lamports,
            address: None,
            data: None,
        }
    }

    pub fn with_address(mut self, address: [u8; 32]) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_data(mut self, data: CompressedAccountData) -> Self {
        self.data = Some(data);
        self
    }

    /// Leaf hash of this account at `leaf_index` in `merkle_tree`.
    pub fn hash(&self, merkle_tree: &Pubkey, leaf_index: u32, is_batched: bool) -> Result<[u8; 32]> {
        self.hash_with_hashed_values(
            &hash_to_field_size_be_with_bump(self.owner.as_ref()),
            &hash_to_field_size_be_with_bump(merkle_tree.as_ref()),
            leaf_index,
            is_batched,
        )
    }

    /// Leaf hash with pre-truncated owner and tree, for hashing many accounts
    /// of the same owner and tree.
    pub fn hash_with_hashed_values(
        &self,
        owner_hashed: &[u8; 32],
        merkle_tree_hashed: &[u8; 32],
        leaf_index: u32,
        is_batched: bool,
    ) -> Result<[u8; 32]> {
        let mut leaf_index_bytes = [0u8; HASH_LEN];
        if is_batched {
            leaf_index_bytes[28..].copy_from_slice(&leaf_index.to_be_bytes());
        } else {
            leaf_index_bytes[28..].copy_from_slice(&leaf_index.to_le_bytes());
        }

        let mut lamports_bytes = [0u8; HASH_LEN];
        lamports_bytes[24..].copy_from_slice(&self.lamports.to_be_bytes());
        lamports_bytes[23] = LAMPORTS_DOMAIN;

        let mut discriminator_bytes = [0u8; HASH_LEN];

        let mut inputs: Vec<&[u8]> = Vec::with_capacity(7);
        inputs.push(owner_hashed);
        inputs.push(&leaf_index_bytes);
        inputs.push(merkle_tree_hashed);
        // Zero lamports are omitted
        if self.lamports != 0 {
            inputs.push(&lamports_bytes);
        }
        if let Some(address) = self.address.as_ref() {
            inputs.push(address);
        }
        if let Some(data) = self.data.as_ref() {
            discriminator_bytes[24..].copy_from_slice(&data.discriminator);
            discriminator_bytes[23] = DISCRIMINATOR_DOMAIN;
            inputs.push(&discriminator_bytes);
            inputs.push(&data.data_hash);
        }

        poseidon::hashv(&inputs)
    }
}

/// Position and proof mode of a leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleContext {
    /// Leaf hash
    pub hash: FieldElement,
    pub tree_info: TreeInfo,
    pub leaf_index: u32,
    /// Leaf is still in the output queue and can be proven by index alone
    pub prove_by_index: bool,
}

/// A compressed account as returned by the indexer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedAccountWithMerkleContext {
    pub compressed_account: CompressedAccount,
    pub merkle_context: MerkleContext,
    pub read_only: bool,
}

impl CompressedAccountWithMerkleContext {
    pub fn lamports(&self) -> u64 {
        self.compressed_account.lamports
    }

    /// Recompute the leaf hash and compare it with the indexer's claim.
    pub fn verify_hash(&self) -> Result<bool> {
        let context = &self.merkle_context;
        let hash = self.compressed_account.hash(
            &context.tree_info.tree,
            context.leaf_index,
            context.tree_info.tree_type.is_batched(),
        )?;
        Ok(hash == context.hash.to_bytes())
    }
}

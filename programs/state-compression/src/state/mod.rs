//! Typed data model for compressed state
//!
//! These records cross the boundary to the indexer (as responses) and to the
//! verifier (after packing).

pub mod compressed_account;
pub mod merkle_tree;
pub mod proof;
pub mod tree_info;

pub use compressed_account::{
    CompressedAccount, CompressedAccountData, CompressedAccountWithMerkleContext, MerkleContext,
};
pub use merkle_tree::MerkleTree;
pub use proof::{AccountProofInputs, AddressProofInputs, ValidityProof, ValidityProofWithContext};
pub use tree_info::{get_tree_info_by_pubkey, select_state_tree_info, TreeInfo, TreeType};

//! Unified error types for the state compression client
//!
//! Error codes are stable across versions for client compatibility.

use anchor_lang::prelude::*;

#[error_code]
pub enum CompressionError {
    // ========== Field Element Errors (6000-6009) ==========

    /// Value is negative or not below the BN254 scalar modulus
    #[msg("Value is out of range for the BN254 scalar field")]
    FieldElementOutOfRange, // 6000

    /// String could not be parsed in the requested base
    #[msg("Invalid field element format for the requested base")]
    InvalidFieldElementFormat, // 6001

    /// Byte input does not match the primitive's fixed width
    #[msg("Invalid length: expected a fixed-width byte input")]
    InvalidLength, // 6002

    // ========== Hashing / Address Errors (6003-6009) ==========

    /// Address seed is not exactly 32 bytes
    #[msg("Invalid seed length: expected 32 bytes")]
    InvalidSeedLength, // 6003

    /// Bump search exhausted every candidate without a field-valid hash
    #[msg("Address derivation failed: no valid bump seed found")]
    AddressDerivationFailed, // 6004

    /// Poseidon hasher rejected its inputs
    #[msg("Poseidon hash failed: inputs must be 32-byte field elements")]
    PoseidonHashFailed, // 6005

    // ========== Packing Errors (6006-6009) ==========

    /// Packed account list exceeds the u8 index range
    #[msg("Too many accounts: packed indices must fit in a u8")]
    TooManyAccounts, // 6006

    /// Input accounts cannot cover the requested lamports
    #[msg("Insufficient balance in compressed accounts")]
    InsufficientBalance, // 6007

    /// Arithmetic overflow occurred
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6008

    // ========== Tree Errors (6009-6012) ==========

    /// No active tree matches the requested type
    #[msg("No active state tree of the requested type")]
    NoActiveStateTree, // 6009

    /// Tree referenced by a record is not in the known tree list
    #[msg("Tree not found in the provided tree infos")]
    TreeNotFound, // 6010

    /// Merkle tree has reached maximum capacity
    #[msg("Merkle tree is full")]
    MerkleTreeFull, // 6011

    /// Leaf index is past the last appended leaf
    #[msg("Leaf index out of bounds")]
    LeafIndexOutOfBounds, // 6012

    // ========== Indexer Errors (6013-6019) ==========

    /// Indexer response has inconsistent or malformed fields
    #[msg("Malformed indexer response")]
    InvalidIndexerResponse, // 6013

    /// Pubkey string is not valid base58
    #[msg("Invalid pubkey string")]
    InvalidPubkey, // 6014

    // ========== Proof Errors (6015-6019) ==========

    /// Proof is absent but an account or address requires one
    #[msg("Validity proof required: not every input is provable by index")]
    MissingValidityProof, // 6015

    /// Invalid tree depth parameter
    #[msg("Tree depth must be between 1 and 32")]
    InvalidTreeDepth, // 6016
}

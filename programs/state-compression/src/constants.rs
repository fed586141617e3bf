//! Protocol constants: program ids, default localnet trees and field parameters.

use solana_program::{pubkey, pubkey::Pubkey};

// ============================================================================
// PROGRAM IDS
// ============================================================================

/// Light system program (verifies proofs and owns compressed state transitions)
pub const LIGHT_SYSTEM_PROGRAM_ID: Pubkey = pubkey!("SySTEM1eSU2p4BGQfQpimFEWWSC1XDFeun3Nqzz3rT7");

/// Account compression program (owns the Merkle tree and queue accounts)
pub const ACCOUNT_COMPRESSION_PROGRAM_ID: Pubkey =
    pubkey!("compr6CUsB5m2jS4Y3831ztGSTnDpnKJTKS95d64XVq");

/// Noop program used as a log sink for state changes
pub const NOOP_PROGRAM_ID: Pubkey = pubkey!("noopb9bkMVfRPU8AsbpTUg8AQkHtKwMYZiFUjNRtMmV");

/// Registered program PDA of the light system program
pub const REGISTERED_PROGRAM_PDA: Pubkey = pubkey!("35hkDgaAKwMCaxRz2ocSZ6NaUrtKkyNqU6c4RV3tYJRh");

// ============================================================================
// DEFAULT LOCALNET TREES
// ============================================================================

/// V1 state Merkle tree
pub const STATE_TREE_V1: Pubkey = pubkey!("smt1NamzXdq4AMqS2fS2F1i5KTYPZRhoHgWx38d8WsT");

/// Nullifier queue paired with [`STATE_TREE_V1`]
pub const NULLIFIER_QUEUE_V1: Pubkey = pubkey!("nfq1NvQDJ2GEgnS8zt9prAe8rjjpAW1zFkrvZoBR148");

/// CPI context account paired with [`STATE_TREE_V1`]
pub const CPI_CONTEXT_V1: Pubkey = pubkey!("cpi1uHzrEhBG733DoEJNgHCyRS3XmmyVNZx5fonubE4");

/// V1 address Merkle tree; the default tree for V1 address derivation
pub const ADDRESS_TREE_V1: Pubkey = pubkey!("amt1Ayt45jfbdw5YSo7iz6WZxUmnZsQTYXy82hVwyC2");

/// Address queue paired with [`ADDRESS_TREE_V1`]
pub const ADDRESS_QUEUE_V1: Pubkey = pubkey!("aq1S9z4reTSQAdgWHGD2zDaS39sjGrAxbR31vxJ2F4F");

/// Batched (V2) state tree
pub const BATCHED_STATE_TREE: Pubkey = pubkey!("bmt1LryLZUMmF7ZtqESaw7wifBXLfXHQYoE4GAmrahU");

/// Output queue paired with [`BATCHED_STATE_TREE`]
pub const BATCHED_OUTPUT_QUEUE: Pubkey = pubkey!("oq1na8gojfdUhsfCpyjNt6h4JaDWtHf1yQj4koBWfto");

/// CPI context account paired with [`BATCHED_STATE_TREE`]
pub const BATCHED_CPI_CONTEXT: Pubkey = pubkey!("cpi15BoVPKgEPw5o8wc2T816GE7b378nMXnhH3Xbq4y");

/// Batched (V2) address tree. V2 address trees are their own queue.
pub const ADDRESS_TREE_V2: Pubkey = pubkey!("amt2kaJA14v3urZbZvnc5v2np8jqvc4Z8zDep5wbtzx");

// ============================================================================
// FIELD / HASHING PARAMETERS
// ============================================================================

/// BN254 scalar field modulus (r), big-endian
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const FIELD_SIZE_BE: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91,
    0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// Trailing byte appended by the bump hash variant
pub const HASH_TO_FIELD_SIZE_SEED: u8 = 255;

/// Seed of the CPI signer PDA every invoking program derives
pub const CPI_AUTHORITY_PDA_SEED: &[u8] = b"cpi_authority";

/// Height of V1 state trees
pub const STATE_MERKLE_TREE_HEIGHT: u8 = 26;

/// Number of roots the verifier keeps for V1 state trees
pub const STATE_MERKLE_TREE_ROOTS: u16 = 2800;

/// Width of every hash, address and field element on the wire
pub const HASH_LEN: usize = 32;

/// Width of a compressed account data discriminator
pub const DISCRIMINATOR_LEN: usize = 8;

/// Domain separator for non-zero lamports in account hashes
pub const LAMPORTS_DOMAIN: u8 = 1;

/// Domain separator for the discriminator in account hashes
pub const DISCRIMINATOR_DOMAIN: u8 = 2;

//! Client-side codec for compressed state on Solana
//!
//! Compressed accounts live as leaves of Poseidon Merkle trees; only roots are
//! stored on-chain. A client therefore has to reproduce, byte for byte, what
//! the verifier expects:
//!
//! - BN254 field elements and their encodings ([`crypto::field`])
//! - Keccak256 hash-to-field truncation ([`crypto::keccak`])
//! - V1/V2 address derivation ([`address`])
//! - index packing of instruction accounts ([`instruction`])
//! - the typed account/tree/proof model ([`state`]) and its indexer records
//!   ([`indexer`])
//!
//! Everything is synchronous and pure. Errors surface as
//! [`error::CompressionError`] through `anchor_lang::Result`.

pub mod address;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod indexer;
pub mod instruction;
pub mod state;


pub use address::{
    derive_address, derive_address_seed, derive_address_seed_v2, derive_address_v2, AddressVersion,
};
pub use config::ProtocolConfig;
pub use crypto::field::FieldElement;
pub use error::CompressionError;
pub use instruction::{pack_new_address_params, NewAddressParams, PackedAccounts};
pub use state::{CompressedAccount, TreeInfo, TreeType, ValidityProof};

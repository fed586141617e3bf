//! Cryptographic primitives for compressed state
//!
//! - [`field`]: BN254 scalar field elements and their encodings
//! - [`conversion`]: fixed-width integer/byte conversions
//! - [`keccak`]: Keccak256 hash-to-field truncation
//! - [`poseidon`]: Poseidon hashing of leaves and tree nodes

pub mod conversion;
pub mod field;
pub mod keccak;
pub mod poseidon;

pub use conversion::{
    big_endian_to_bytes, bytes_to_big_endian, bytes_to_little_endian, bytes_to_pubkey,
    little_endian_to_bytes, pubkey_to_bytes,
};
pub use field::{field_size, is_smaller_than_field_size, FieldBase, FieldElement, FieldInput};
pub use keccak::{
    hash_to_field_size_be, hash_to_field_size_be_with_bump, hashv_to_field_size_be,
    hashv_to_field_size_be_with_bump,
};

//! Instruction packing for compressed state
//!
//! - `Packed*` structs: contain `u8` indices, for instruction data.
//! - Non-packed structs: contain pubkeys, used by clients and returned by the indexer.
//! - [`PackedAccounts`]: deduplicates accounts and assigns the indices.
//!
//! ```text
//! client
//!  ├─ fetch accounts + ValidityProof from the indexer
//!  ├─ pack NewAddressParams / input accounts into Packed* structs
//!  ├─ append the returned list as remaining accounts, same order
//!  └─ send transaction
//! ```

pub mod address_params;
pub mod compressed_accounts;
pub mod pack_accounts;

pub use address_params::*;
pub use compressed_accounts::*;
pub use pack_accounts::*;

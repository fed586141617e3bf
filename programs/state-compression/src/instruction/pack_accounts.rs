//! Account index packing
//!
//! Instruction data references accounts by `u8` index into the transaction's
//! remaining accounts instead of embedding 32-byte pubkeys. The packed list is
//! append-only and duplicate-free; its insertion order fixes every index.
//!
//! Lists are bounded by the transaction size (a few dozen entries), so a
//! linear scan is all the dedup needed.

use anchor_lang::prelude::*;
use solana_program::instruction::AccountMeta;

use crate::error::CompressionError;

/// Return the index of `pubkey` in `accounts`, appending it if absent.
///
/// # Errors
/// * `TooManyAccounts` - the index does not fit in a u8
pub fn insert_or_get_index(accounts: &mut Vec<Pubkey>, pubkey: Pubkey) -> Result<u8> {
    if let Some(index) = accounts.iter().position(|account| *account == pubkey) {
        return u8::try_from(index).map_err(|_| error!(CompressionError::TooManyAccounts));
    }
    let index =
        u8::try_from(accounts.len()).map_err(|_| error!(CompressionError::TooManyAccounts))?;
    accounts.push(pubkey);
    Ok(index)
}

/// Owned working set of packed accounts for one instruction.
///
/// Not internally synchronized: one owner per packing operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedAccounts {
    accounts: Vec<Pubkey>,
}

impl PackedAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from accounts the instruction already references.
    pub fn from_accounts(accounts: Vec<Pubkey>) -> Self {
        Self { accounts }
    }

    pub fn insert_or_get(&mut self, pubkey: Pubkey) -> Result<u8> {
        insert_or_get_index(&mut self.accounts, pubkey)
    }

    pub fn get(&self, index: u8) -> Option<&Pubkey> {
        self.accounts.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn as_slice(&self) -> &[Pubkey] {
        &self.accounts
    }

    pub fn into_inner(self) -> Vec<Pubkey> {
        self.accounts
    }

    /// Remaining-account metas in index order: writable, never signers.
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        to_account_metas(&self.accounts)
    }
}

/// Writable, non-signer metas for a packed list, preserving order.
pub fn to_account_metas(accounts: &[Pubkey]) -> Vec<AccountMeta> {
    accounts
        .iter()
        .map(|pubkey| AccountMeta::new(*pubkey, false))
        .collect()
}

//! New address parameters
//!
//! Creating an address requires proving it is absent from an address tree.
//! The instruction carries the address seed, the root index the proof was made
//! against, and the indices of the address tree and its queue.
//!
//! # Packing Order
//! All address tree indices are resolved first, then all queue indices. With
//! fresh accounts this places every tree before every queue; the verifier
//! relies only on the indices, but clients must reproduce this order to build
//! byte-identical instructions.

use anchor_lang::prelude::*;
use tracing::debug;

use crate::instruction::pack_accounts::insert_or_get_index;
use crate::state::tree_info::TreeInfo;

/// Client-side parameters for one new address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAddressParams {
    pub seed: [u8; 32],
    pub address_merkle_tree_root_index: u16,
    pub address_merkle_tree_pubkey: Pubkey,
    pub address_queue_pubkey: Pubkey,
}

impl NewAddressParams {
    /// Parameters targeting the tree and queue of `tree_info`.
    pub fn new(seed: [u8; 32], tree_info: &TreeInfo, root_index: u16) -> Self {
        Self {
            seed,
            address_merkle_tree_root_index: root_index,
            address_merkle_tree_pubkey: tree_info.tree,
            address_queue_pubkey: tree_info.queue,
        }
    }
}

/// Instruction-data form of [`NewAddressParams`]. Field order is fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct NewAddressParamsPacked {
    pub seed: [u8; 32],
    pub address_queue_account_index: u8,
    pub address_merkle_tree_account_index: u8,
    pub address_merkle_tree_root_index: u16,
}

/// Replace tree and queue pubkeys with indices into a remaining-accounts list.
///
/// # Arguments
/// * `params` - Address parameters in instruction order
/// * `initial_accounts` - Accounts already present; kept, even if unused
///
/// # Returns
/// Packed records in `params` order and the final account list, which must be
/// passed as the transaction's remaining accounts at the same positions.
pub fn pack_new_address_params(
    params: &[NewAddressParams],
    initial_accounts: &[Pubkey],
) -> Result<(Vec<NewAddressParamsPacked>, Vec<Pubkey>)> {
    let mut remaining_accounts = initial_accounts.to_vec();
    let mut packed: Vec<NewAddressParamsPacked> = params
        .iter()
        .map(|p| NewAddressParamsPacked {
            seed: p.seed,
            address_merkle_tree_root_index: p.address_merkle_tree_root_index,
            ..Default::default()
        })
        .collect();

    for (packed, p) in packed.iter_mut().zip(params) {
        packed.address_merkle_tree_account_index =
            insert_or_get_index(&mut remaining_accounts, p.address_merkle_tree_pubkey)?;
    }
    for (packed, p) in packed.iter_mut().zip(params) {
        packed.address_queue_account_index =
            insert_or_get_index(&mut remaining_accounts, p.address_queue_pubkey)?;
    }

    debug!(
        params = params.len(),
        accounts = remaining_accounts.len(),
        "packed new address params"
    );
    Ok((packed, remaining_accounts))
}

//! Input/output compressed account packing
//!
//! Input accounts are nullified by the instruction, so each one carries its
//! tree and queue indices, leaf index, proof mode and root index. Outputs only
//! need the index of the account new leaves are appended to.

use anchor_lang::prelude::*;
use tracing::debug;

use crate::error::CompressionError;
use crate::instruction::pack_accounts::insert_or_get_index;
use crate::state::compressed_account::{CompressedAccount, CompressedAccountWithMerkleContext};
use crate::state::tree_info::TreeInfo;

/// Merkle context with pubkeys replaced by indices. Field order is fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct PackedMerkleContext {
    pub merkle_tree_pubkey_index: u8,
    pub queue_pubkey_index: u8,
    pub leaf_index: u32,
    pub prove_by_index: bool,
}

/// Instruction-data form of an input account.
#[derive(Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct PackedCompressedAccountWithMerkleContext {
    pub compressed_account: CompressedAccount,
    pub merkle_context: PackedMerkleContext,
    /// Ignored by the verifier when proving by index
    pub root_index: u16,
    pub read_only: bool,
}

/// Result of [`pack_compressed_accounts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedCompressedAccounts {
    pub inputs: Vec<PackedCompressedAccountWithMerkleContext>,
    pub output_state_tree_index: u8,
    pub remaining_accounts: Vec<Pubkey>,
}

/// Pack input accounts and the output tree into a remaining-accounts list.
///
/// For each input, its tree then its queue are inserted. The output account is
/// inserted last: the active successor's output queue for batched trees, the
/// tree itself for V1.
///
/// # Errors
/// * `InvalidLength` - `root_indices` and `inputs` differ in length
/// * `TooManyAccounts` - indices overflow u8
pub fn pack_compressed_accounts(
    inputs: &[CompressedAccountWithMerkleContext],
    root_indices: &[u16],
    output_tree: &TreeInfo,
    initial_accounts: &[Pubkey],
) -> Result<PackedCompressedAccounts> {
    require!(
        inputs.len() == root_indices.len(),
        CompressionError::InvalidLength
    );

    let mut remaining_accounts = initial_accounts.to_vec();
    let mut packed_inputs = Vec::with_capacity(inputs.len());

    for (input, &root_index) in inputs.iter().zip(root_indices) {
        let context = &input.merkle_context;
        let merkle_tree_pubkey_index =
            insert_or_get_index(&mut remaining_accounts, context.tree_info.tree)?;
        let queue_pubkey_index =
            insert_or_get_index(&mut remaining_accounts, context.tree_info.queue)?;

        packed_inputs.push(PackedCompressedAccountWithMerkleContext {
            compressed_account: input.compressed_account.clone(),
            merkle_context: PackedMerkleContext {
                merkle_tree_pubkey_index,
                queue_pubkey_index,
                leaf_index: context.leaf_index,
                prove_by_index: context.prove_by_index,
            },
            root_index,
            read_only: input.read_only,
        });
    }

    let output_account = output_tree.active().output_account();
    let output_state_tree_index = insert_or_get_index(&mut remaining_accounts, output_account)?;

    debug!(
        inputs = packed_inputs.len(),
        output = %output_account,
        accounts = remaining_accounts.len(),
        "packed compressed accounts"
    );
    Ok(PackedCompressedAccounts {
        inputs: packed_inputs,
        output_state_tree_index,
        remaining_accounts,
    })
}

/// Select the fewest accounts (largest first) covering `transfer_lamports`.
///
/// # Returns
/// Selected accounts and their lamport total.
///
/// # Errors
/// * `InsufficientBalance` - all accounts together fall short
/// * `ArithmeticOverflow` - the running total overflows u64
pub fn select_min_compressed_sol_accounts_for_transfer(
    accounts: &[CompressedAccountWithMerkleContext],
    transfer_lamports: u64,
) -> Result<(Vec<CompressedAccountWithMerkleContext>, u64)> {
    let mut sorted: Vec<&CompressedAccountWithMerkleContext> = accounts.iter().collect();
    sorted.sort_by(|a, b| b.lamports().cmp(&a.lamports()));

    let mut selected = Vec::new();
    let mut total: u64 = 0;
    for account in sorted {
        if total >= transfer_lamports {
            break;
        }
        total = total
            .checked_add(account.lamports())
            .ok_or_else(|| error!(CompressionError::ArithmeticOverflow))?;
        selected.push(account.clone());
    }

    require!(
        total >= transfer_lamports,
        CompressionError::InsufficientBalance
    );
    Ok((selected, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::field::FieldElement;
    use crate::state::compressed_account::MerkleContext;
    use crate::state::tree_info::TreeType;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn account(lamports: u64, tree_info: TreeInfo, leaf_index: u32) -> CompressedAccountWithMerkleContext {
        CompressedAccountWithMerkleContext {
            compressed_account: CompressedAccount::new(key(1), lamports),
            merkle_context: MerkleContext {
                hash: FieldElement::from(u64::from(leaf_index)),
                tree_info,
                leaf_index,
                prove_by_index: false,
            },
            read_only: false,
        }
    }

    fn v1_tree() -> TreeInfo {
        TreeInfo::new(key(10), key(11), TreeType::StateV1)
    }

    fn v2_tree() -> TreeInfo {
        TreeInfo::new(key(20), key(21), TreeType::StateV2)
    }

    #[test]
    fn test_pack_inputs_and_v1_output() {
        let inputs = vec![account(5, v1_tree(), 0), account(6, v1_tree(), 1)];
        let packed = pack_compressed_accounts(&inputs, &[7, 8], &v1_tree(), &[]).unwrap();

        assert_eq!(packed.remaining_accounts, vec![key(10), key(11)]);
        assert_eq!(packed.output_state_tree_index, 0);
        assert_eq!(packed.inputs[1].merkle_context.merkle_tree_pubkey_index, 0);
        assert_eq!(packed.inputs[1].merkle_context.queue_pubkey_index, 1);
        assert_eq!(packed.inputs[1].merkle_context.leaf_index, 1);
        assert_eq!(packed.inputs[1].root_index, 8);
    }

    #[test]
    fn test_v2_output_goes_to_queue() {
        let inputs = vec![account(5, v1_tree(), 0)];
        let packed = pack_compressed_accounts(&inputs, &[0], &v2_tree(), &[]).unwrap();
        assert_eq!(packed.remaining_accounts, vec![key(10), key(11), key(21)]);
        assert_eq!(packed.output_state_tree_index, 2);
    }

    #[test]
    fn test_output_follows_rollover() {
        let rolled = v1_tree().with_next(TreeInfo::new(key(30), key(31), TreeType::StateV1));
        let packed = pack_compressed_accounts(&[], &[], &rolled, &[]).unwrap();
        assert_eq!(packed.remaining_accounts, vec![key(30)]);
    }

    #[test]
    fn test_root_indices_length_mismatch() {
        let inputs = vec![account(5, v1_tree(), 0)];
        assert!(pack_compressed_accounts(&inputs, &[], &v1_tree(), &[]).is_err());
    }

    #[test]
    fn test_select_largest_first() {
        let accounts = vec![
            account(10, v1_tree(), 0),
            account(50, v1_tree(), 1),
            account(30, v1_tree(), 2),
        ];
        let (selected, total) =
            select_min_compressed_sol_accounts_for_transfer(&accounts, 60).unwrap();
        assert_eq!(total, 80);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].lamports(), 50);
        assert_eq!(selected[1].lamports(), 30);
    }

    #[test]
    fn test_select_insufficient() {
        let accounts = vec![account(10, v1_tree(), 0)];
        assert!(select_min_compressed_sol_accounts_for_transfer(&accounts, 11).is_err());
    }

    #[test]
    fn test_select_zero_needs_nothing() {
        let accounts = vec![account(10, v1_tree(), 0)];
        let (selected, total) =
            select_min_compressed_sol_accounts_for_transfer(&accounts, 0).unwrap();
        assert!(selected.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_packed_merkle_context_layout() {
        let context = PackedMerkleContext {
            merkle_tree_pubkey_index: 1,
            queue_pubkey_index: 2,
            leaf_index: 3,
            prove_by_index: true,
        };
        assert_eq!(context.try_to_vec().unwrap(), vec![1, 2, 3, 0, 0, 0, 1]);
    }
}

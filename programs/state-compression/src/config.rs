//! Protocol configuration
//!
//! Program ids and default trees a client targets. `Default` is localnet;
//! other clusters override individual fields.

use anchor_lang::prelude::*;
use rand::Rng;
use solana_program::instruction::AccountMeta;

use crate::address::AddressVersion;
use crate::constants::*;
use crate::state::tree_info::{select_state_tree_info, TreeInfo, TreeType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub light_system_program: Pubkey,
    pub account_compression_program: Pubkey,
    pub noop_program: Pubkey,
    pub registered_program_pda: Pubkey,
    pub address_version: AddressVersion,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            light_system_program: LIGHT_SYSTEM_PROGRAM_ID,
            account_compression_program: ACCOUNT_COMPRESSION_PROGRAM_ID,
            noop_program: NOOP_PROGRAM_ID,
            registered_program_pda: REGISTERED_PROGRAM_PDA,
            address_version: AddressVersion::default(),
        }
    }
}

impl ProtocolConfig {
    /// CPI signer PDA of an invoking program.
    ///
    /// Seeds: `["cpi_authority"]` under `program_id`.
    pub fn find_cpi_signer(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[CPI_AUTHORITY_PDA_SEED], program_id)
    }

    /// Authority the light system program signs with towards account compression.
    pub fn account_compression_authority(&self) -> Pubkey {
        Self::find_cpi_signer(&self.light_system_program).0
    }

    /// Fixed accounts preceding the packed remaining accounts of an invoking
    /// program's CPI, in order.
    pub fn system_account_metas(&self, invoking_program: &Pubkey) -> Vec<AccountMeta> {
        let (cpi_signer, _) = Self::find_cpi_signer(invoking_program);
        vec![
            AccountMeta::new_readonly(self.light_system_program, false),
            AccountMeta::new_readonly(cpi_signer, false),
            AccountMeta::new_readonly(self.registered_program_pda, false),
            AccountMeta::new_readonly(self.noop_program, false),
            AccountMeta::new_readonly(self.account_compression_authority(), false),
            AccountMeta::new_readonly(self.account_compression_program, false),
            AccountMeta::new_readonly(*invoking_program, false),
        ]
    }

    /// Tree the configured address version derives against by default.
    pub fn default_address_tree(&self) -> TreeInfo {
        match self.address_version {
            AddressVersion::V1 => {
                TreeInfo::new(ADDRESS_TREE_V1, ADDRESS_QUEUE_V1, TreeType::AddressV1)
            }
            AddressVersion::V2 => {
                TreeInfo::new(ADDRESS_TREE_V2, ADDRESS_TREE_V2, TreeType::AddressV2)
            }
        }
    }
}

/// Localnet state trees, V1 and batched.
pub fn default_state_tree_infos() -> Vec<TreeInfo> {
    vec![
        TreeInfo::new(STATE_TREE_V1, NULLIFIER_QUEUE_V1, TreeType::StateV1)
            .with_cpi_context(CPI_CONTEXT_V1),
        TreeInfo::new(BATCHED_STATE_TREE, BATCHED_OUTPUT_QUEUE, TreeType::StateV2)
            .with_cpi_context(BATCHED_CPI_CONTEXT),
    ]
}

/// Random localnet state tree of the build's default type.
pub fn select_default_state_tree<R: Rng + ?Sized>(rng: &mut R) -> Result<TreeInfo> {
    select_state_tree_info(&default_state_tree_infos(), TreeType::default_state(), rng)
}

/// Every localnet tree: state trees followed by address trees.
pub fn default_tree_infos() -> Vec<TreeInfo> {
    let mut infos = default_state_tree_infos();
    infos.push(TreeInfo::new(ADDRESS_TREE_V1, ADDRESS_QUEUE_V1, TreeType::AddressV1));
    infos.push(TreeInfo::new(ADDRESS_TREE_V2, ADDRESS_TREE_V2, TreeType::AddressV2));
    infos
}

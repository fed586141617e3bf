//! Indexer boundary records
//!
//! JSON shapes exchanged with a compression indexer. Hashes, roots and
//! addresses travel as base58 strings, pubkeys as base58 strings, account data
//! as a byte array. Transport is left to the caller; these records only fix
//! the wire format and convert responses into the typed model.
//!
//! Every conversion re-validates: hashes go through the field codec, pubkeys
//! through base58 parsing, trees are resolved against known tree infos.

use std::str::FromStr;

use anchor_lang::prelude::*;
use serde::{Deserialize, Serialize};

use crate::crypto::field::{FieldBase, FieldElement};
use crate::error::CompressionError;
use crate::state::compressed_account::{
    CompressedAccount, CompressedAccountData, CompressedAccountWithMerkleContext, MerkleContext,
};
use crate::state::proof::{
    AccountProofInputs, AddressProofInputs, ValidityProof, ValidityProofWithContext,
};
use crate::state::tree_info::{get_tree_info_by_pubkey, TreeInfo, TreeType};

pub const JSONRPC_VERSION: &str = "2.0";

pub const METHOD_GET_COMPRESSED_ACCOUNT: &str = "getCompressedAccount";
pub const METHOD_GET_COMPRESSED_ACCOUNTS_BY_OWNER: &str = "getCompressedAccountsByOwner";
pub const METHOD_GET_VALIDITY_PROOF: &str = "getValidityProof";
pub const METHOD_GET_STATE_TREE_INFOS: &str = "getStateTreeInfos";

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest<P> {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: P,
}

impl<P> JsonRpcRequest<P> {
    pub fn new(id: impl Into<String>, method: &str, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.to_string(),
            params,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub slot: u64,
}

/// Response value tagged with the slot it was read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithContext<T> {
    pub context: Context,
    pub value: T,
}

/// One page of a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithCursor<T> {
    pub items: Vec<T>,
    /// `None` on the last page
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCompressedAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl GetCompressedAccountRequest {
    pub fn by_hash(hash: &FieldElement) -> Self {
        Self {
            hash: Some(hash.to_base58()),
            address: None,
        }
    }

    pub fn by_address(address: &[u8; 32]) -> Self {
        Self {
            hash: None,
            address: Some(bs58::encode(address).into_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCompressedAccountsByOwnerRequest {
    pub owner: String,
    #[serde(flatten)]
    pub options: PaginatedOptions,
}

impl GetCompressedAccountsByOwnerRequest {
    pub fn new(owner: &Pubkey, options: PaginatedOptions) -> Self {
        Self {
            owner: owner.to_string(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressWithTree {
    pub address: String,
    pub tree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetValidityProofRequest {
    pub hashes: Vec<String>,
    pub new_addresses_with_trees: Vec<AddressWithTree>,
}

impl GetValidityProofRequest {
    pub fn new(hashes: &[FieldElement], new_addresses: &[([u8; 32], Pubkey)]) -> Self {
        Self {
            hashes: hashes.iter().map(FieldElement::to_base58).collect(),
            new_addresses_with_trees: new_addresses
                .iter()
                .map(|(address, tree)| AddressWithTree {
                    address: bs58::encode(address).into_string(),
                    tree: tree.to_string(),
                })
                .collect(),
        }
    }
}

/// Tree metadata as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeInfoRecord {
    pub tree: String,
    pub queue: String,
    pub tree_type: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpi_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_tree_info: Option<Box<TreeInfoRecord>>,
}

impl TryFrom<&TreeInfoRecord> for TreeInfo {
    type Error = anchor_lang::error::Error;

    fn try_from(record: &TreeInfoRecord) -> Result<Self> {
        let next_tree_info = match record.next_tree_info.as_deref() {
            Some(next) => Some(Box::new(TreeInfo::try_from(next)?)),
            None => None,
        };
        Ok(TreeInfo {
            tree: parse_pubkey(&record.tree)?,
            queue: parse_pubkey(&record.queue)?,
            tree_type: TreeType::try_from(record.tree_type)?,
            cpi_context: record.cpi_context.as_deref().map(parse_pubkey).transpose()?,
            next_tree_info,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDataRecord {
    /// Little-endian u64 view of the 8 discriminator bytes
    pub discriminator: u64,
    pub data: Vec<u8>,
    pub data_hash: String,
}

/// A compressed account as returned by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressedAccountRecord {
    pub hash: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub data: Option<AccountDataRecord>,
    pub owner: String,
    pub lamports: u64,
    pub tree: String,
    pub leaf_index: u32,
    #[serde(default)]
    pub prove_by_index: bool,
}

impl CompressedAccountRecord {
    /// Convert into the typed model, resolving `tree` against `tree_infos`.
    ///
    /// # Errors
    /// * `InvalidPubkey` - owner or tree is not a base58 pubkey
    /// * `TreeNotFound` - tree is unknown
    /// * `InvalidFieldElementFormat`/`FieldElementOutOfRange` - bad hash
    pub fn to_account(&self, tree_infos: &[TreeInfo]) -> Result<CompressedAccountWithMerkleContext> {
        let tree = parse_pubkey(&self.tree)?;
        let tree_info = get_tree_info_by_pubkey(tree_infos, &tree)?.clone();

        let data = match &self.data {
            Some(data) => Some(CompressedAccountData {
                discriminator: data.discriminator.to_le_bytes(),
                data: data.data.clone(),
                data_hash: parse_hash(&data.data_hash)?.to_bytes(),
            }),
            None => None,
        };

        Ok(CompressedAccountWithMerkleContext {
            compressed_account: CompressedAccount {
                owner: parse_pubkey(&self.owner)?,
                lamports: self.lamports,
                address: self.address.as_deref().map(parse_address).transpose()?,
                data,
            },
            merkle_context: MerkleContext {
                hash: parse_hash(&self.hash)?,
                tree_info,
                leaf_index: self.leaf_index,
                prove_by_index: self.prove_by_index,
            },
            read_only: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedProofRecord {
    pub a: Vec<u8>,
    pub b: Vec<u8>,
    pub c: Vec<u8>,
}

impl TryFrom<&CompressedProofRecord> for ValidityProof {
    type Error = anchor_lang::error::Error;

    fn try_from(record: &CompressedProofRecord) -> Result<Self> {
        ValidityProof::from_parts(&record.a, &record.b, &record.c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProofRecord {
    pub hash: String,
    pub root: String,
    pub root_index: u16,
    pub leaf_index: u32,
    pub tree: String,
    #[serde(default)]
    pub prove_by_index: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressProofRecord {
    pub address: String,
    pub root: String,
    pub root_index: u16,
    pub tree: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityProofRecord {
    #[serde(default)]
    pub compressed_proof: Option<CompressedProofRecord>,
    #[serde(default)]
    pub accounts: Vec<AccountProofRecord>,
    #[serde(default)]
    pub addresses: Vec<AddressProofRecord>,
}

impl ValidityProofRecord {
    /// Convert into the typed model and check the proof is present if needed.
    ///
    /// # Errors
    /// * `MissingValidityProof` - a full proof is required but absent
    /// * `TreeNotFound`, `InvalidPubkey`, field codec errors - bad records
    pub fn to_validity_proof(&self, tree_infos: &[TreeInfo]) -> Result<ValidityProofWithContext> {
        let proof = self
            .compressed_proof
            .as_ref()
            .map(ValidityProof::try_from)
            .transpose()?;

        let accounts = self
            .accounts
            .iter()
            .map(|account| -> Result<AccountProofInputs> {
                let tree = parse_pubkey(&account.tree)?;
                Ok(AccountProofInputs {
                    hash: parse_hash(&account.hash)?,
                    root: parse_hash(&account.root)?,
                    root_index: account.root_index,
                    leaf_index: account.leaf_index,
                    tree_info: get_tree_info_by_pubkey(tree_infos, &tree)?.clone(),
                    prove_by_index: account.prove_by_index,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let addresses = self
            .addresses
            .iter()
            .map(|address| -> Result<AddressProofInputs> {
                let tree = parse_pubkey(&address.tree)?;
                Ok(AddressProofInputs {
                    address: parse_address(&address.address)?,
                    root: parse_hash(&address.root)?,
                    root_index: address.root_index,
                    tree_info: get_tree_info_by_pubkey(tree_infos, &tree)?.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let context = ValidityProofWithContext {
            proof,
            accounts,
            addresses,
        };
        context.validate()?;
        Ok(context)
    }
}

fn parse_pubkey(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).map_err(|_| error!(CompressionError::InvalidPubkey))
}

fn parse_hash(s: &str) -> Result<FieldElement> {
    FieldElement::from_str_radix(s, FieldBase::Base58)
}

fn parse_address(s: &str) -> Result<[u8; 32]> {
    Ok(parse_hash(s)?.to_bytes())
}

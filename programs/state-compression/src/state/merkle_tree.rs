//! In-memory Merkle tree for local proofs and fixtures
//!
//! Append-only, Poseidon-hashed, with all-zero empty leaves: the same shape
//! as on-chain state trees. Keeps every layer so inclusion paths can be
//! served for any leaf, which makes it suitable for mocks of the indexer and
//! for checking indexer-supplied paths.

use anchor_lang::prelude::*;

use crate::crypto::field::{is_smaller_than_field_size, FieldElement};
use crate::crypto::poseidon;
use crate::error::CompressionError;
use crate::state::compressed_account::MerkleContext;
use crate::state::tree_info::TreeInfo;

/// Maximum supported tree depth (leaf indices are u32)
pub const MAX_TREE_DEPTH: u8 = 32;

/// Minimum supported tree depth
pub const MIN_TREE_DEPTH: u8 = 1;

#[derive(Clone, Debug)]
pub struct MerkleTree {
    depth: u8,

    /// layers[0] = leaves, layers[depth] = [root] once non-empty
    layers: Vec<Vec<[u8; 32]>>,

    /// Precomputed zero values for each level
    /// zeros[0] = empty leaf
    /// zeros[i] = hash(zeros[i-1], zeros[i-1])
    zeros: Vec<[u8; 32]>,
}

impl MerkleTree {
    pub fn new(depth: u8) -> Result<Self> {
        require!(
            (MIN_TREE_DEPTH..=MAX_TREE_DEPTH).contains(&depth),
            CompressionError::InvalidTreeDepth
        );
        Ok(Self {
            depth,
            layers: vec![Vec::new(); depth as usize + 1],
            zeros: Self::compute_zero_values(depth)?,
        })
    }

    /// Compute zero hash values for each tree level.
    fn compute_zero_values(depth: u8) -> Result<Vec<[u8; 32]>> {
        let mut zeros = Vec::with_capacity(depth as usize + 1);
        zeros.push(poseidon::empty_leaf_hash());

        for i in 1..=depth as usize {
            let prev = zeros[i - 1];
            zeros.push(poseidon::hash_two_to_one(&prev, &prev)?);
        }

        Ok(zeros)
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    pub fn is_full(&self) -> bool {
        self.len() as u64 >= self.capacity()
    }

    pub fn root(&self) -> [u8; 32] {
        self.layers[self.depth as usize]
            .first()
            .copied()
            .unwrap_or(self.zeros[self.depth as usize])
    }

    pub fn leaf(&self, index: u32) -> Option<[u8; 32]> {
        self.layers[0].get(index as usize).copied()
    }

    /// Append a leaf and return its index.
    ///
    /// # Errors
    /// * `MerkleTreeFull` - tree has reached capacity
    /// * `FieldElementOutOfRange` - leaf is not a field element
    pub fn append(&mut self, leaf: [u8; 32]) -> Result<u32> {
        require!(!self.is_full(), CompressionError::MerkleTreeFull);
        require!(
            is_smaller_than_field_size(&leaf),
            CompressionError::FieldElementOutOfRange
        );

        let leaf_index = self.len();
        self.layers[0].push(leaf);

        let mut index = leaf_index;
        for level in 0..self.depth as usize {
            let left_index = index & !1;
            let left = self.layers[level][left_index];
            let right = self.layers[level]
                .get(left_index + 1)
                .copied()
                .unwrap_or(self.zeros[level]);
            let parent = poseidon::hash_two_to_one(&left, &right)?;

            index >>= 1;
            let next = &mut self.layers[level + 1];
            if index < next.len() {
                next[index] = parent;
            } else {
                next.push(parent);
            }
        }

        u32::try_from(leaf_index).map_err(|_| error!(CompressionError::ArithmeticOverflow))
    }

    /// Sibling hashes from leaf to root.
    pub fn path(&self, leaf_index: u32) -> Result<Vec<[u8; 32]>> {
        require!(
            (leaf_index as usize) < self.len(),
            CompressionError::LeafIndexOutOfBounds
        );

        let mut index = leaf_index as usize;
        let mut path = Vec::with_capacity(self.depth as usize);
        for level in 0..self.depth as usize {
            let sibling = self.layers[level]
                .get(index ^ 1)
                .copied()
                .unwrap_or(self.zeros[level]);
            path.push(sibling);
            index >>= 1;
        }
        Ok(path)
    }

    /// Recompute the root from a leaf and its path.
    pub fn compute_root(leaf: &[u8; 32], leaf_index: u32, path: &[[u8; 32]]) -> Result<[u8; 32]> {
        let mut current = *leaf;
        let mut index = leaf_index;
        for sibling in path {
            current = if index & 1 == 1 {
                poseidon::hash_two_to_one(sibling, &current)?
            } else {
                poseidon::hash_two_to_one(&current, sibling)?
            };
            index >>= 1;
        }
        Ok(current)
    }

    /// Check a path against `root`.
    pub fn verify(leaf: &[u8; 32], leaf_index: u32, path: &[[u8; 32]], root: &[u8; 32]) -> Result<bool> {
        Ok(Self::compute_root(leaf, leaf_index, path)? == *root)
    }

    /// Merkle context of an appended leaf.
    pub fn merkle_context(&self, leaf_index: u32, tree_info: TreeInfo) -> Result<MerkleContext> {
        let leaf = self
            .leaf(leaf_index)
            .ok_or_else(|| error!(CompressionError::LeafIndexOutOfBounds))?;
        Ok(MerkleContext {
            hash: FieldElement::from_bytes(&leaf)?,
            tree_info,
            leaf_index,
            prove_by_index: false,
        })
    }
}

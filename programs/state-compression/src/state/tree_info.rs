//! Tree metadata
//!
//! Every compressed account lives in a state tree; every address lives in an
//! address tree. Each tree is paired with a queue account: V1 state trees with
//! a nullifier queue, batched (V2) state trees with an output queue that new
//! leaves are appended to.
//!
//! A full tree is rolled over: the old [`TreeInfo`] keeps a link to its
//! successor, and appends must follow that link.

use anchor_lang::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::CompressionError;

/// Tree variant tag. Discriminants match the on-chain account metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum TreeType {
    StateV1 = 1,
    AddressV1 = 2,
    StateV2 = 3,
    AddressV2 = 4,
}

impl TreeType {
    /// State tree type new outputs go to by default.
    pub fn default_state() -> Self {
        if cfg!(feature = "v2") {
            TreeType::StateV2
        } else {
            TreeType::StateV1
        }
    }

    pub fn is_state(self) -> bool {
        matches!(self, TreeType::StateV1 | TreeType::StateV2)
    }

    pub fn is_address(self) -> bool {
        !self.is_state()
    }

    /// Batched trees hash leaf indices big-endian and append through a queue.
    pub fn is_batched(self) -> bool {
        matches!(self, TreeType::StateV2 | TreeType::AddressV2)
    }
}

impl From<TreeType> for u64 {
    fn from(tree_type: TreeType) -> u64 {
        tree_type as u64
    }
}

impl TryFrom<u64> for TreeType {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u64) -> Result<Self> {
        match value {
            1 => Ok(TreeType::StateV1),
            2 => Ok(TreeType::AddressV1),
            3 => Ok(TreeType::StateV2),
            4 => Ok(TreeType::AddressV2),
            _ => Err(error!(CompressionError::InvalidIndexerResponse)),
        }
    }
}

/// Identifies one Merkle tree and its companion accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeInfo {
    pub tree: Pubkey,
    pub queue: Pubkey,
    pub tree_type: TreeType,
    pub cpi_context: Option<Pubkey>,
    /// Successor after rollover
    pub next_tree_info: Option<Box<TreeInfo>>,
}

impl TreeInfo {
    pub fn new(tree: Pubkey, queue: Pubkey, tree_type: TreeType) -> Self {
        Self {
            tree,
            queue,
            tree_type,
            cpi_context: None,
            next_tree_info: None,
        }
    }

    pub fn with_cpi_context(mut self, cpi_context: Pubkey) -> Self {
        self.cpi_context = Some(cpi_context);
        self
    }

    pub fn with_next(mut self, next: TreeInfo) -> Self {
        self.next_tree_info = Some(Box::new(next));
        self
    }

    /// Follow the rollover chain to the tree currently accepting appends.
    pub fn active(&self) -> &TreeInfo {
        let mut current = self;
        while let Some(next) = current.next_tree_info.as_deref() {
            current = next;
        }
        current
    }

    pub fn is_rolled_over(&self) -> bool {
        self.next_tree_info.is_some()
    }

    /// Account that new leaves are written to: the output queue for batched
    /// state trees, the tree itself for V1.
    pub fn output_account(&self) -> Pubkey {
        if self.tree_type == TreeType::StateV2 {
            self.queue
        } else {
            self.tree
        }
    }
}

/// Pick a random active tree of `tree_type`.
///
/// Rolled-over trees are replaced by their successor; duplicates collapse.
///
/// # Errors
/// * `NoActiveStateTree` - `tree_type` is not a state type or nothing matches
pub fn select_state_tree_info<R: Rng + ?Sized>(
    infos: &[TreeInfo],
    tree_type: TreeType,
    rng: &mut R,
) -> Result<TreeInfo> {
    require!(tree_type.is_state(), CompressionError::NoActiveStateTree);

    let mut candidates: Vec<&TreeInfo> = Vec::with_capacity(infos.len());
    for info in infos.iter().filter(|info| info.tree_type == tree_type) {
        let active = info.active();
        if active.tree_type == tree_type && !candidates.iter().any(|c| c.tree == active.tree) {
            candidates.push(active);
        }
    }

    let selected = candidates
        .choose(rng)
        .ok_or_else(|| error!(CompressionError::NoActiveStateTree))?;
    debug!(tree = %selected.tree, candidates = candidates.len(), "selected state tree");
    Ok((*selected).clone())
}

/// Look up a tree by its tree or queue pubkey.
pub fn get_tree_info_by_pubkey<'a>(infos: &'a [TreeInfo], pubkey: &Pubkey) -> Result<&'a TreeInfo> {
    infos
        .iter()
        .find(|info| info.tree == *pubkey || info.queue == *pubkey)
        .ok_or_else(|| error!(CompressionError::TreeNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn info(byte: u8, tree_type: TreeType) -> TreeInfo {
        TreeInfo::new(
            Pubkey::new_from_array([byte; 32]),
            Pubkey::new_from_array([byte.wrapping_add(100); 32]),
            tree_type,
        )
    }

    #[test]
    fn test_tree_type_roundtrip() {
        for tree_type in [
            TreeType::StateV1,
            TreeType::AddressV1,
            TreeType::StateV2,
            TreeType::AddressV2,
        ] {
            assert_eq!(TreeType::try_from(u64::from(tree_type)).unwrap(), tree_type);
        }
        assert!(TreeType::try_from(0).is_err());
        assert!(TreeType::try_from(5).is_err());
    }

    #[test]
    fn test_output_account() {
        let v1 = info(1, TreeType::StateV1);
        let v2 = info(2, TreeType::StateV2);
        assert_eq!(v1.output_account(), v1.tree);
        assert_eq!(v2.output_account(), v2.queue);
    }

    #[test]
    fn test_active_follows_rollover_chain() {
        let last = info(3, TreeType::StateV1);
        let middle = info(2, TreeType::StateV1).with_next(last.clone());
        let first = info(1, TreeType::StateV1).with_next(middle);
        assert!(first.is_rolled_over());
        assert_eq!(first.active(), &last);
    }

    #[test]
    fn test_select_filters_by_type() {
        let infos = vec![info(1, TreeType::StateV1), info(2, TreeType::StateV2)];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let selected = select_state_tree_info(&infos, TreeType::StateV2, &mut rng).unwrap();
            assert_eq!(selected.tree, infos[1].tree);
        }
    }

    #[test]
    fn test_select_skips_rolled_over() {
        let successor = info(9, TreeType::StateV1);
        let infos = vec![info(1, TreeType::StateV1).with_next(successor.clone())];
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_state_tree_info(&infos, TreeType::StateV1, &mut rng).unwrap();
        assert_eq!(selected, successor);
    }

    #[test]
    fn test_select_empty_fails() {
        let infos = vec![info(1, TreeType::AddressV1)];
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_state_tree_info(&infos, TreeType::StateV1, &mut rng).is_err());
        assert!(select_state_tree_info(&infos, TreeType::AddressV1, &mut rng).is_err());
    }

    #[test]
    fn test_lookup_by_tree_or_queue() {
        let infos = vec![info(1, TreeType::StateV1), info(2, TreeType::StateV1)];
        assert_eq!(get_tree_info_by_pubkey(&infos, &infos[1].tree).unwrap(), &infos[1]);
        assert_eq!(get_tree_info_by_pubkey(&infos, &infos[1].queue).unwrap(), &infos[1]);
        assert!(get_tree_info_by_pubkey(&infos, &Pubkey::new_from_array([50u8; 32])).is_err());
    }
}

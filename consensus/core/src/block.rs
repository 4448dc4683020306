use crate::Slot;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainStatus {
    Canonical,
    Pending,
    Orphaned,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown chain status '{0}'")]
pub struct ChainStatusError(pub String);

impl FromStr for ChainStatus {
    type Err = ChainStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canonical" => Ok(Self::Canonical),
            "pending" => Ok(Self::Pending),
            "orphaned" => Ok(Self::Orphaned),
            _ => Err(ChainStatusError(s.to_string())),
        }
    }
}

impl fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Canonical => "canonical",
            Self::Pending => "pending",
            Self::Orphaned => "orphaned",
        })
    }
}

/// The consensus-relevant record of one observed block.
///
/// Carries the full consensus state (including both lock checkpoints) so that any
/// instance can be handed to chain selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub height: u64,
    pub state_hash: String,
    pub parent_hash: String,
    pub ledger_hash: String,
    pub chain_status: ChainStatus,
    /// Block timestamp (milliseconds since UNIX epoch)
    pub timestamp: u64,
    pub global_slot_since_hardfork: Slot,
    pub global_slot_since_genesis: Slot,
    pub distance_from_max_block_height: u64,
    /// Hex encoded VRF output of the block producer
    pub last_vrf_output: String,
    pub min_window_density: u64,
    pub sub_window_densities: Vec<u64>,
    pub staking_lock_checkpoint: String,
    pub next_epoch_lock_checkpoint: String,
}

impl BlockInfo {
    pub fn is_best_tip_candidate(&self) -> bool {
        self.distance_from_max_block_height == 0
    }
}

/// Anything which can stand as a chain tip during fork choice
pub trait ChainTip {
    fn block_info(&self) -> &BlockInfo;
}

impl ChainTip for BlockInfo {
    fn block_info(&self) -> &BlockInfo {
        self
    }
}

impl<T: ChainTip> ChainTip for &T {
    fn block_info(&self) -> &BlockInfo {
        (*self).block_info()
    }
}

/// A block record paired with a payload which is opaque to chain selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipCandidate<P> {
    pub block_info: BlockInfo,
    pub payload: P,
}

impl<P> TipCandidate<P> {
    pub fn new(block_info: BlockInfo, payload: P) -> Self {
        Self { block_info, payload }
    }
}

impl<P> ChainTip for TipCandidate<P> {
    fn block_info(&self) -> &BlockInfo {
        &self.block_info
    }
}

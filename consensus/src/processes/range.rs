//!
//! Short/long range fork classification.
//!
//! Two tips are in "short range" when their forks share the staking ledger, which can be
//! told from the lock checkpoints: either both tips are in the same epoch and agree on the
//! staking checkpoint, or one epoch follows the other and the older tip's next epoch
//! checkpoint became the newer tip's staking checkpoint.
//!

use zkarchive_consensus_core::{BlockInfo, Epoch, ProtocolConstants};

#[derive(Clone, Debug)]
pub struct RangeClassifier {
    constants: ProtocolConstants,
}

impl RangeClassifier {
    pub fn new(constants: &ProtocolConstants) -> Self {
        Self { constants: constants.clone() }
    }

    pub fn epoch(&self, block: &BlockInfo) -> Epoch {
        self.constants.epoch_of(block.global_slot_since_genesis)
    }

    pub fn is_short_range(&self, a: &BlockInfo, b: &BlockInfo) -> bool {
        let (epoch_a, epoch_b) = (self.epoch(a), self.epoch(b));
        match epoch_a.abs_diff(epoch_b) {
            0 => a.staking_lock_checkpoint == b.staking_lock_checkpoint,
            1 => self.is_epoch_transition_valid(a, b) || self.is_epoch_transition_valid(b, a),
            _ => false,
        }
    }

    /// Checks whether `newer` can directly follow `older` across one epoch boundary
    pub fn is_epoch_transition_valid(&self, older: &BlockInfo, newer: &BlockInfo) -> bool {
        let next_slot_in_epoch = self.constants.slot_in_epoch(older.global_slot_since_genesis) + 1;
        self.epoch(older) + 1 == self.epoch(newer)
            && !self.in_seed_update_range(next_slot_in_epoch)
            && older.next_epoch_lock_checkpoint == newer.staking_lock_checkpoint
    }

    fn in_seed_update_range(&self, slot_in_epoch: u64) -> bool {
        slot_in_epoch < self.constants.seed_update_range_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkarchive_consensus_core::{ChainStatus, config::constants::MAINNET_CONSTANTS};

    fn block(slot: u64, staking: &str, next: &str) -> BlockInfo {
        BlockInfo {
            height: 10,
            state_hash: format!("3NK{}", slot),
            parent_hash: "3NKparent".to_string(),
            ledger_hash: "jxledger".to_string(),
            chain_status: ChainStatus::Pending,
            timestamp: 0,
            global_slot_since_hardfork: slot,
            global_slot_since_genesis: slot,
            distance_from_max_block_height: 0,
            last_vrf_output: "00".to_string(),
            min_window_density: 0,
            sub_window_densities: vec![0; 11],
            staking_lock_checkpoint: staking.to_string(),
            next_epoch_lock_checkpoint: next.to_string(),
        }
    }

    #[test]
    fn test_same_epoch() {
        let classifier = RangeClassifier::new(&MAINNET_CONSTANTS);
        assert!(classifier.is_short_range(&block(10, "s", "n1"), &block(7000, "s", "n2")));
        assert!(!classifier.is_short_range(&block(10, "s1", "n"), &block(7000, "s2", "n")));
    }

    #[test]
    fn test_adjacent_epochs() {
        let classifier = RangeClassifier::new(&MAINNET_CONSTANTS);
        // Slot 5000 is past the seed update range (4760) of epoch 0
        let older = block(5000, "s0", "s1");
        let newer = block(7140 + 20, "s1", "s2");
        assert!(classifier.is_epoch_transition_valid(&older, &newer));
        assert!(classifier.is_short_range(&older, &newer));
        assert!(classifier.is_short_range(&newer, &older));

        // Same checkpoints, but the older tip was still inside the seed update range
        let early = block(100, "s0", "s1");
        assert!(!classifier.is_epoch_transition_valid(&early, &newer));
        assert!(!classifier.is_short_range(&early, &newer));

        // Checkpoint mismatch
        assert!(!classifier.is_short_range(&block(5000, "s0", "other"), &newer));
    }

    #[test]
    fn test_seed_update_range_boundary() {
        let classifier = RangeClassifier::new(&MAINNET_CONSTANTS);
        let newer = block(7140, "s1", "s2");
        // Next slot of 4758 is 4759, still inside [0, 4760)
        assert!(!classifier.is_epoch_transition_valid(&block(4758, "s0", "s1"), &newer));
        assert!(classifier.is_epoch_transition_valid(&block(4759, "s0", "s1"), &newer));
    }

    #[test]
    fn test_distant_epochs_are_long_range() {
        let classifier = RangeClassifier::new(&MAINNET_CONSTANTS);
        assert!(!classifier.is_short_range(&block(5000, "s", "s"), &block(3 * 7140, "s", "s")));
    }
}

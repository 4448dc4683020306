use zkarchive_consensus_core::{BlockInfo, ProtocolConstants, Slot};

/// Recomputes a tip's minimum window density as seen from a later global slot.
///
/// The stored densities describe the window ending at the tip's own slot. Moving the
/// window forward to `max_slot` drops the sub-windows which the tip never produced into,
/// i.e. those strictly between the tip's relative sub-window and the target's. Once the target
/// is a full window ahead only the tip's own sub-window is left.
#[derive(Clone, Debug)]
pub struct WindowDensityManager {
    constants: ProtocolConstants,
}

impl WindowDensityManager {
    pub fn new(constants: &ProtocolConstants) -> Self {
        Self { constants: constants.clone() }
    }

    pub fn min_window_density(&self, tip: &BlockInfo, max_slot: Slot) -> u64 {
        let tip_sub_window = self.constants.sub_window_of(tip.global_slot_since_genesis);
        let max_sub_window = self.constants.sub_window_of(max_slot);
        let in_grace_period = tip.global_slot_since_hardfork < self.constants.grace_period_end();

        if in_grace_period || tip_sub_window == max_sub_window {
            return tip.min_window_density;
        }

        let current_window_density = self.projected_window(tip, max_sub_window.saturating_sub(tip_sub_window)).iter().sum::<u64>();
        tip.min_window_density.min(current_window_density)
    }

    /// Same as [`Self::min_window_density`] but returns the stored value untouched when the tip
    /// already sits at `max_slot`
    pub fn virtual_min_window_density(&self, tip: &BlockInfo, max_slot: Slot) -> u64 {
        if tip.global_slot_since_genesis == max_slot {
            return tip.min_window_density;
        }
        self.min_window_density(tip, max_slot)
    }

    /// Zeroes the sub-windows strictly between the tip's and the one `gap` sub-windows later.
    /// A gap of a full window or more leaves only the tip's own sub-window.
    fn projected_window(&self, tip: &BlockInfo, gap: u64) -> Vec<u64> {
        let n = self.constants.sub_windows_per_window();
        let tip_relative = self.constants.relative_sub_window_of(tip.global_slot_since_genesis);
        let end = tip_relative + gap.min(n);

        let mut window = tip.sub_window_densities.clone();
        for i in (tip_relative + 1)..end {
            if let Some(density) = window.get_mut((i % n) as usize) {
                *density = 0;
            }
        }
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkarchive_consensus_core::{ChainStatus, config::constants::MAINNET_CONSTANTS};

    fn tip(slot: Slot, min_window_density: u64, sub_window_densities: Vec<u64>) -> BlockInfo {
        BlockInfo {
            height: 100,
            state_hash: "3NKtip".to_string(),
            parent_hash: "3NKparent".to_string(),
            ledger_hash: "jxledger".to_string(),
            chain_status: ChainStatus::Pending,
            timestamp: 0,
            global_slot_since_hardfork: slot,
            global_slot_since_genesis: slot,
            distance_from_max_block_height: 0,
            last_vrf_output: "00".to_string(),
            min_window_density,
            sub_window_densities,
            staking_lock_checkpoint: "lock".to_string(),
            next_epoch_lock_checkpoint: "next".to_string(),
        }
    }

    fn manager() -> WindowDensityManager {
        WindowDensityManager::new(&MAINNET_CONSTANTS)
    }

    #[test]
    fn test_same_sub_window_keeps_stored_density() {
        // Slots 7000 and 7006 share sub-window 1000
        let block = tip(7000, 40, vec![5; 11]);
        assert_eq!(manager().min_window_density(&block, 7006), 40);
    }

    #[test]
    fn test_grace_period_keeps_stored_density() {
        let block = tip(100, 40, vec![1; 11]);
        assert_eq!(manager().min_window_density(&block, 5000), 40);
    }

    #[test]
    fn test_zeroes_skipped_sub_windows() {
        // Slot 7000 is relative sub-window 1000 % 11 = 10, slot 7000 + 3 * 7 lands on relative 2.
        // Positions 0 and 1 (after wrapping) are zeroed.
        let densities = (1..=11).collect::<Vec<u64>>();
        let block = tip(7000, 100, densities);
        let expected = (1..=11).sum::<u64>() - 1 - 2;
        assert_eq!(manager().min_window_density(&block, 7000 + 3 * 7), expected);
    }

    #[test]
    fn test_keeps_stored_density_when_lower() {
        let block = tip(7000, 10, vec![5; 11]);
        assert_eq!(manager().min_window_density(&block, 7014), 10);
    }

    #[test]
    fn test_adjacent_sub_window_zeroes_nothing() {
        let block = tip(7000, 100, vec![5; 11]);
        assert_eq!(manager().min_window_density(&block, 7007), 55);
    }

    #[test]
    fn test_virtual_density_short_circuits_at_max_slot() {
        let block = tip(7000, 100, vec![0; 11]);
        assert_eq!(manager().virtual_min_window_density(&block, 7000), 100);
        assert_eq!(manager().virtual_min_window_density(&block, 7100), 0);
    }

    #[test]
    fn test_density_bounded_and_non_increasing() {
        let densities = vec![3, 0, 7, 2, 9, 1, 4, 4, 6, 0, 5];
        let total = densities.iter().sum::<u64>();
        let block = tip(20_000, total, densities);
        let manager = manager();
        let mut previous = block.min_window_density;
        for max_slot in 20_000..20_000 + 30 * 7 {
            let density = manager.min_window_density(&block, max_slot);
            assert!(density <= total);
            assert!(density <= previous, "density increased at slot {}", max_slot);
            previous = density;
        }
    }

    #[test]
    fn test_full_window_gap_keeps_only_tip_sub_window() {
        // Slot 20_000 is sub-window 2857, relative position 8
        let block = tip(20_000, 100, vec![5; 11]);
        let manager = manager();
        assert_eq!(manager.min_window_density(&block, 20_000 + 10 * 7), 10);
        assert_eq!(manager.min_window_density(&block, 20_000 + 11 * 7), 5);
        assert_eq!(manager.min_window_density(&block, 20_000 + 12 * 7), 5);
        assert_eq!(manager.min_window_density(&block, 20_000 + 40 * 7), 5);
    }

    #[test]
    fn test_full_window_stale_tip_loses_to_fresher_one() {
        let densities = (1..=11).collect::<Vec<u64>>();
        let manager = manager();
        let stale = tip(20_000, 100, densities.clone());
        let fresher = tip(20_000 + 7, 100, densities);
        let max_slot = 20_000 + 11 * 7;
        assert!(manager.min_window_density(&stale, max_slot) <= manager.min_window_density(&fresher, max_slot));
    }

    #[test]
    fn test_grace_period_boundary() {
        // Mainnet grace period ends at slot 1440; slots 1439 and 1440 share sub-window 205
        let manager = manager();
        let inside = tip(1439, 100, vec![5; 11]);
        let outside = tip(1440, 100, vec![5; 11]);
        let max_slot = 1440 + 3 * 7;
        assert_eq!(manager.min_window_density(&inside, max_slot), 100);
        assert_eq!(manager.min_window_density(&outside, max_slot), 45);
    }
}

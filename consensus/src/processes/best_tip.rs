use super::chain_selection::ChainSelectionManager;
use zkarchive_consensus_core::ChainTip;
use zkarchive_core::debug;

impl ChainSelectionManager {
    /// Collapses competing best tips into the canonical one.
    ///
    /// `records` must be sorted by descending height. The leading run of records at the
    /// maximal height (`distance_from_max_block_height == 0`) is replaced by the single tip
    /// chosen by [`Self::chain_select`]; everything after it is left untouched.
    pub fn filter_best_tip<T: ChainTip>(&self, mut records: Vec<T>) -> Vec<T> {
        let tips_len = records.iter().take_while(|record| record.block_info().is_best_tip_candidate()).count();
        if tips_len <= 1 {
            return records;
        }

        debug!("Collapsing {} competing best tips at height {}", tips_len, records[0].block_info().height);
        let rest = records.split_off(tips_len);
        let mut filtered = Vec::with_capacity(rest.len() + 1);
        filtered.extend(self.chain_select(records));
        filtered.extend(rest);
        filtered
    }
}

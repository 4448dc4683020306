use crate::model::{ArchiveRow, RowId};
use zkarchive_consensus_core::ChainStatus;

/// Builds archive rows for tests. Defaults describe a single pending block with one
/// transaction holding one account update (id 10) which emitted one single-field event (id 1).
pub struct RowBuilder {
    row: ArchiveRow,
}

impl RowBuilder {
    pub fn new(state_hash: &str, transaction_hash: &str) -> Self {
        Self {
            row: ArchiveRow {
                state_hash: state_hash.to_string(),
                parent_hash: "3NKparent".to_string(),
                ledger_hash: "jxledger".to_string(),
                height: 1,
                chain_status: ChainStatus::Pending,
                timestamp: 1_700_000_000_000,
                global_slot_since_hardfork: 9000,
                global_slot_since_genesis: 9000,
                distance_from_max_block_height: 0,
                last_vrf_output: "00".to_string(),
                min_window_density: 33,
                sub_window_densities: vec![3; 11],
                staking_lock_checkpoint: "lock".to_string(),
                next_epoch_lock_checkpoint: "next".to_string(),
                hash: transaction_hash.to_string(),
                status: "applied".to_string(),
                memo: "E4YM2vTHhWEg66xpj52JErHUBU4pZ1yageL4TVDDpTTSsv8mK6YaH".to_string(),
                authorization_kind: "Proof".to_string(),
                account_update_id: 10,
                account_update_ids: vec![10],
                emitted_id: 1,
                emitted_ids: vec![1],
                element_ids: vec![1],
                field_id: 1,
                field_value: "0".to_string(),
                action_state_values: None,
            },
        }
    }

    pub fn height(mut self, height: u64, distance_from_max_block_height: u64) -> Self {
        self.row.height = height;
        self.row.distance_from_max_block_height = distance_from_max_block_height;
        self
    }

    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.row.timestamp = timestamp;
        self
    }

    pub fn chain_status(mut self, chain_status: ChainStatus) -> Self {
        self.row.chain_status = chain_status;
        self
    }

    pub fn vrf(mut self, last_vrf_output: &str) -> Self {
        self.row.last_vrf_output = last_vrf_output.to_string();
        self
    }

    pub fn account_update(mut self, id: RowId, transaction_account_updates: Vec<RowId>) -> Self {
        self.row.account_update_id = id;
        self.row.account_update_ids = transaction_account_updates;
        self
    }

    pub fn emitted(mut self, id: RowId, account_update_emitted: Vec<RowId>) -> Self {
        self.row.emitted_id = id;
        self.row.emitted_ids = account_update_emitted;
        self
    }

    pub fn elements(mut self, element_ids: Vec<RowId>) -> Self {
        self.row.element_ids = element_ids;
        self
    }

    pub fn field(mut self, id: RowId, value: &str) -> Self {
        self.row.field_id = id;
        self.row.field_value = value.to_string();
        self
    }

    pub fn action_states(mut self, values: [&str; 5]) -> Self {
        self.row.action_state_values = Some(values.map(str::to_string));
        self
    }

    pub fn build(self) -> ArchiveRow {
        self.row
    }
}

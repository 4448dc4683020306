use serde::{Deserialize, Serialize};
use zkarchive_consensus_core::{BlockInfo, ChainStatus, ChainTip, Slot};

/// Primary key of a row in the relational chain mirror
pub type RowId = i64;

/// One leaf-field tuple as returned by the events/actions query.
///
/// Block and transaction columns are repeated on every row; the trailing columns identify
/// which field element of which event (or action) of which account update the row carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRow {
    pub state_hash: String,
    pub parent_hash: String,
    pub ledger_hash: String,
    pub height: u64,
    pub chain_status: ChainStatus,
    pub timestamp: u64,
    pub global_slot_since_hardfork: Slot,
    pub global_slot_since_genesis: Slot,
    pub distance_from_max_block_height: u64,
    pub last_vrf_output: String,
    pub min_window_density: u64,
    pub sub_window_densities: Vec<u64>,
    pub staking_lock_checkpoint: String,
    pub next_epoch_lock_checkpoint: String,

    /// Transaction hash
    pub hash: String,
    pub status: String,
    pub memo: String,
    pub authorization_kind: String,

    pub account_update_id: RowId,
    /// Ordered account update ids of the whole transaction
    pub account_update_ids: Vec<RowId>,
    /// Id of the event (or action) field array this row belongs to
    pub emitted_id: RowId,
    /// Ordered event (or action) ids of the owning account update. Repeats are legal.
    pub emitted_ids: Vec<RowId>,
    /// Ordered field ids making up the event (or action)
    pub element_ids: Vec<RowId>,
    pub field_id: RowId,
    pub field_value: String,

    /// Action state checkpoints, only present on action rows
    #[serde(default)]
    pub action_state_values: Option<[String; 5]>,
}

impl ArchiveRow {
    pub fn block_info(&self) -> BlockInfo {
        BlockInfo {
            height: self.height,
            state_hash: self.state_hash.clone(),
            parent_hash: self.parent_hash.clone(),
            ledger_hash: self.ledger_hash.clone(),
            chain_status: self.chain_status,
            timestamp: self.timestamp,
            global_slot_since_hardfork: self.global_slot_since_hardfork,
            global_slot_since_genesis: self.global_slot_since_genesis,
            distance_from_max_block_height: self.distance_from_max_block_height,
            last_vrf_output: self.last_vrf_output.clone(),
            min_window_density: self.min_window_density,
            sub_window_densities: self.sub_window_densities.clone(),
            staking_lock_checkpoint: self.staking_lock_checkpoint.clone(),
            next_epoch_lock_checkpoint: self.next_epoch_lock_checkpoint.clone(),
        }
    }

    pub fn transaction_info(&self) -> TransactionInfo {
        TransactionInfo {
            status: self.status.clone(),
            hash: self.hash.clone(),
            memo: self.memo.clone(),
            authorization_kind: self.authorization_kind.clone(),
        }
    }

    /// Key shared by all rows of one logical event or action
    pub fn emitted_key(&self) -> (RowId, RowId) {
        (self.account_update_id, self.emitted_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub status: String,
    pub hash: String,
    pub memo: String,
    pub authorization_kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub data: Vec<String>,
    pub transaction_info: TransactionInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub account_update_id: RowId,
    pub data: Vec<String>,
    pub transaction_info: TransactionInfo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmittedKind {
    Event,
    Action,
}

/// Reassembled data of one transaction, shaped by the requested kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmittedData {
    Events(Vec<Event>),
    Actions(Vec<Action>),
}

/// The five action state checkpoints committed by a block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStates {
    pub action_state_one: String,
    pub action_state_two: String,
    pub action_state_three: String,
    pub action_state_four: String,
    pub action_state_five: String,
}

impl From<[String; 5]> for ActionStates {
    fn from([one, two, three, four, five]: [String; 5]) -> Self {
        Self { action_state_one: one, action_state_two: two, action_state_three: three, action_state_four: four, action_state_five: five }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsBlock {
    pub block_info: BlockInfo,
    pub event_data: Vec<Event>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsBlock {
    pub block_info: BlockInfo,
    pub action_state: ActionStates,
    pub action_data: Vec<Action>,
}

impl ChainTip for EventsBlock {
    fn block_info(&self) -> &BlockInfo {
        &self.block_info
    }
}

impl ChainTip for ActionsBlock {
    fn block_info(&self) -> &BlockInfo {
        &self.block_info
    }
}

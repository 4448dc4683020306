use crate::{
    errors::{ReconstructError, ReconstructResult},
    model::{ActionStates, ActionsBlock, ArchiveRow, EmittedData, EmittedKind, EventsBlock},
    reconstruct::{
        BlocksWithTransactions, get_element_id_field_values, map_action_or_event, partition_blocks, remove_redundant_emitted_fields,
    },
};
use itertools::Itertools;
use zkarchive_consensus::ChainSelectionManager;
use zkarchive_consensus_core::{ChainTip, ProtocolConstants};
use zkarchive_core::{debug, span::Span};

/// Reassembles the events or actions carried by the rows of one transaction
fn transaction_data(kind: EmittedKind, rows: &[ArchiveRow]) -> ReconstructResult<EmittedData> {
    let field_values = get_element_id_field_values(rows);
    Ok(map_action_or_event(kind, &remove_redundant_emitted_fields(rows)?, &field_values))
}

/// Turns the flat row sequence of an events or actions query into canonical per-block records.
///
/// Holds no per-request state, so one instance can serve concurrent requests.
#[derive(Clone, Debug)]
pub struct ArchiveReconstructor {
    chain_selection: ChainSelectionManager,
}

impl ArchiveReconstructor {
    pub fn new(constants: &ProtocolConstants) -> Self {
        Self { chain_selection: ChainSelectionManager::new(constants) }
    }

    pub fn events(&self, rows: Vec<ArchiveRow>, parent: Option<&Span>) -> ReconstructResult<Vec<EventsBlock>> {
        let span = Span::enter(parent, "events");
        let blocks = self.assemble(rows, &span, |first, transactions| {
            let mut event_data = Vec::new();
            for rows in transactions {
                if let EmittedData::Events(events) = transaction_data(EmittedKind::Event, rows)? {
                    event_data.extend(events);
                }
            }
            Ok(EventsBlock { block_info: first.block_info(), event_data })
        })?;
        Ok(self.sort_and_filter_blocks(blocks))
    }

    pub fn actions(&self, rows: Vec<ArchiveRow>, parent: Option<&Span>) -> ReconstructResult<Vec<ActionsBlock>> {
        let span = Span::enter(parent, "actions");
        let blocks = self.assemble(rows, &span, |first, transactions| {
            let action_state = first
                .action_state_values
                .clone()
                .map(ActionStates::from)
                .ok_or_else(|| ReconstructError::MissingActionState(first.state_hash.clone()))?;
            let mut action_data = Vec::new();
            for rows in transactions {
                if let EmittedData::Actions(actions) = transaction_data(EmittedKind::Action, rows)? {
                    action_data.extend(actions);
                }
            }
            Ok(ActionsBlock { block_info: first.block_info(), action_state, action_data })
        })?;
        Ok(self.sort_and_filter_blocks(blocks))
    }

    /// Orders blocks by ascending `(height, timestamp)` and collapses competing best tips
    /// at the maximal height into the canonical one
    pub fn sort_and_filter_blocks<T: ChainTip>(&self, blocks: Vec<T>) -> Vec<T> {
        let mut descending = blocks
            .into_iter()
            .sorted_by_key(|block| (block.block_info().height, block.block_info().timestamp))
            .rev()
            .collect::<Vec<_>>();
        descending = self.chain_selection.filter_best_tip(descending);
        descending.reverse();
        descending
    }

    /// Partitions rows and builds one record per block from the block's first row and its
    /// transactions' rows
    fn assemble<B>(
        &self,
        rows: Vec<ArchiveRow>,
        span: &Span,
        build: impl Fn(&ArchiveRow, &mut dyn Iterator<Item = &[ArchiveRow]>) -> ReconstructResult<B>,
    ) -> ReconstructResult<Vec<B>> {
        let row_count = rows.len();
        let blocks: BlocksWithTransactions = {
            let _partition = span.child("partition_blocks");
            partition_blocks(rows)
        };
        debug!("[{}] {} rows span {} blocks", span.name(), row_count, blocks.len());

        let _reconstruct = span.child("reconstruct");
        blocks
            .into_iter()
            .map(|(state_hash, transactions)| {
                let first = transactions.values().find_map(|rows| rows.first()).ok_or(ReconstructError::EmptyBlock(state_hash))?;
                build(first, &mut transactions.values().map(Vec::as_slice))
            })
            .collect()
    }
}

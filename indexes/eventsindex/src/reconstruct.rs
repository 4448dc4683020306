use crate::{
    errors::{ReconstructError, ReconstructResult},
    model::{Action, ArchiveRow, EmittedData, EmittedKind, Event, RowId},
};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap, HashSet};
use zkarchive_core::{trace, warn};

/// Rows of one transaction keyed by transaction hash, in first-seen order
pub type BlockTransactions = IndexMap<String, Vec<ArchiveRow>>;

/// Transactions keyed by block state hash, in first-seen order
pub type BlocksWithTransactions = IndexMap<String, BlockTransactions>;

/// Field element id to raw field value
pub type FieldValues = HashMap<RowId, String>;

/// Groups rows by block state hash, then by transaction hash. Row order is preserved
/// within every group and groups appear in the order they were first seen.
pub fn partition_blocks(rows: impl IntoIterator<Item = ArchiveRow>) -> BlocksWithTransactions {
    let mut blocks = BlocksWithTransactions::new();
    for row in rows {
        blocks.entry(row.state_hash.clone()).or_default().entry(row.hash.clone()).or_default().push(row);
    }
    blocks
}

/// Maps every field element id to its value. A later row overwrites an earlier one for the same id.
pub fn get_element_id_field_values<'a>(rows: impl IntoIterator<Item = &'a ArchiveRow>) -> FieldValues {
    rows.into_iter().map(|row| (row.field_id, row.field_value.clone())).collect()
}

/// Removes the duplication introduced by unnesting field arrays.
///
/// Rows sharing `(account_update_id, emitted_id)` describe the same event (or action); the first
/// one seen is kept as representative and placed at every `(account update index, event index)`
/// slot it occupies within the transaction. The result follows on-chain emission order.
///
/// Fails when a row's account update is not part of its transaction's account updates, which
/// means the archive data is inconsistent.
pub fn remove_redundant_emitted_fields(rows: &[ArchiveRow]) -> ReconstructResult<Vec<&ArchiveRow>> {
    let mut seen = HashSet::new();
    let mut grid = BTreeMap::new();

    for row in rows {
        if !seen.insert(row.emitted_key()) {
            continue;
        }

        let Some(account_update_index) = row.account_update_ids.iter().position(|id| *id == row.account_update_id) else {
            warn!("Account update {} is missing from transaction {}", row.account_update_id, row.hash);
            return Err(ReconstructError::MissingAccountUpdate {
                account_update_id: row.account_update_id,
                transaction_hash: row.hash.clone(),
            });
        };

        let mut placed = false;
        for (emitted_index, _) in row.emitted_ids.iter().enumerate().filter(|(_, id)| **id == row.emitted_id) {
            grid.insert((account_update_index, emitted_index), row);
            placed = true;
        }
        if !placed {
            trace!("Emitted array {} is not listed by account update {}", row.emitted_id, row.account_update_id);
        }
    }

    Ok(grid.into_values().collect())
}

/// Resolves a row's ordered field ids. Ids outside the fetched rows are skipped.
fn resolve_data(row: &ArchiveRow, field_values: &FieldValues) -> Vec<String> {
    row.element_ids.iter().filter_map(|id| field_values.get(id).cloned()).collect()
}

pub fn map_events(rows: &[&ArchiveRow], field_values: &FieldValues) -> Vec<Event> {
    rows.iter().map(|row| Event { data: resolve_data(row, field_values), transaction_info: row.transaction_info() }).collect()
}

pub fn map_actions(rows: &[&ArchiveRow], field_values: &FieldValues) -> Vec<Action> {
    rows.iter()
        .map(|row| Action {
            account_update_id: row.account_update_id,
            data: resolve_data(row, field_values),
            transaction_info: row.transaction_info(),
        })
        .collect()
}

/// Builds events or actions from deduplicated rows, as selected by `kind`
pub fn map_action_or_event(kind: EmittedKind, rows: &[&ArchiveRow], field_values: &FieldValues) -> EmittedData {
    match kind {
        EmittedKind::Event => EmittedData::Events(map_events(rows, field_values)),
        EmittedKind::Action => EmittedData::Actions(map_actions(rows, field_values)),
    }
}

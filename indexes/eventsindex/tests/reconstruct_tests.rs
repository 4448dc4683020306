use zkarchive_consensus::ChainSelectionManager;
use zkarchive_consensus_core::{ChainStatus, config::constants::MAINNET_CONSTANTS};
use zkarchive_core::span::Span;
use zkarchive_eventsindex::{
    ArchiveReconstructor,
    errors::ReconstructError,
    model::{ArchiveRow, EmittedData, EmittedKind},
    reconstruct::{get_element_id_field_values, map_action_or_event, remove_redundant_emitted_fields},
    test_helpers::RowBuilder,
};

/// Rows of one event with `fields` field elements, as produced by the unnesting join:
/// every field row is repeated once per element of the event
fn unnested_event_rows(state_hash: &str, tx: &str, emitted_id: i64, fields: &[(i64, &str)]) -> Vec<ArchiveRow> {
    let element_ids = fields.iter().map(|(id, _)| *id).collect::<Vec<_>>();
    let mut rows = Vec::new();
    for _ in 0..fields.len() {
        for (id, value) in fields {
            rows.push(
                RowBuilder::new(state_hash, tx)
                    .account_update(10, vec![10, 12])
                    .emitted(emitted_id, vec![1, 2])
                    .elements(element_ids.clone())
                    .field(*id, value)
                    .build(),
            );
        }
    }
    rows
}

#[test]
fn test_duplicate_laden_rows_yield_one_event() {
    let rows = unnested_event_rows("A", "t1", 1, &[(100, "3"), (101, "1"), (102, "4"), (103, "1")]);
    let filtered = remove_redundant_emitted_fields(&rows).unwrap();
    let values = get_element_id_field_values(&rows);
    let EmittedData::Events(events) = map_action_or_event(EmittedKind::Event, &filtered, &values) else {
        panic!("expected events");
    };
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data, vec!["3", "1", "4", "1"]);
}

#[test]
fn test_events_grouped_per_block() {
    let reconstructor = ArchiveReconstructor::new(&MAINNET_CONSTANTS);
    let mut rows = unnested_event_rows("3NKlow", "t1", 1, &[(1, "a")]);
    rows.extend(unnested_event_rows("3NKlow", "t1", 2, &[(2, "b"), (3, "c")]));
    rows.extend(unnested_event_rows("3NKhigh", "t2", 1, &[(4, "d")]));
    for row in rows.iter_mut().filter(|row| row.state_hash == "3NKlow") {
        row.height = 5;
        row.distance_from_max_block_height = 1;
        row.chain_status = ChainStatus::Canonical;
    }
    for row in rows.iter_mut().filter(|row| row.state_hash == "3NKhigh") {
        row.height = 6;
    }

    let root = Span::new("request");
    let blocks = reconstructor.events(rows, Some(&root)).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].block_info.state_hash, "3NKlow");
    assert_eq!(blocks[0].event_data.iter().map(|event| event.data.clone()).collect::<Vec<_>>(), vec![vec!["a"], vec!["b", "c"]]);
    assert_eq!(blocks[1].block_info.state_hash, "3NKhigh");
    assert_eq!(blocks[1].event_data.len(), 1);
}

#[test]
fn test_competing_tips_collapse_to_selected_one() {
    let reconstructor = ArchiveReconstructor::new(&MAINNET_CONSTANTS);
    let rows = vec![
        RowBuilder::new("3NKold", "t0").height(9, 1).build(),
        RowBuilder::new("3NKa", "t1").height(10, 0).vrf("00").build(),
        RowBuilder::new("3NKb", "t2").height(10, 0).vrf("ff").build(),
    ];
    let expected = ChainSelectionManager::new(&MAINNET_CONSTANTS).select(rows[1].block_info(), rows[2].block_info());

    let blocks = reconstructor.events(rows, None).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].block_info.state_hash, "3NKold");
    assert_eq!(blocks[1].block_info, expected);
}

#[test]
fn test_sorted_by_height_then_timestamp() {
    let reconstructor = ArchiveReconstructor::new(&MAINNET_CONSTANTS);
    let rows = vec![
        RowBuilder::new("3NKc", "t3").height(8, 0).timestamp(30).build(),
        RowBuilder::new("3NKb", "t2").height(7, 1).timestamp(20).build(),
        RowBuilder::new("3NKa", "t1").height(7, 1).timestamp(10).build(),
    ];
    let blocks = reconstructor.events(rows, None).unwrap();
    assert_eq!(blocks.iter().map(|block| block.block_info.state_hash.as_str()).collect::<Vec<_>>(), vec!["3NKa", "3NKb", "3NKc"]);
}

#[test]
fn test_actions_carry_action_state() {
    let reconstructor = ArchiveReconstructor::new(&MAINNET_CONSTANTS);
    let states = ["s1", "s2", "s3", "s4", "s5"];
    let rows = vec![
        RowBuilder::new("3NKa", "t1").account_update(12, vec![10, 12]).elements(vec![1, 2]).field(1, "7").action_states(states).build(),
        RowBuilder::new("3NKa", "t1").account_update(12, vec![10, 12]).elements(vec![1, 2]).field(2, "8").action_states(states).build(),
    ];
    let blocks = reconstructor.actions(rows, None).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].action_state.action_state_one, "s1");
    assert_eq!(blocks[0].action_state.action_state_five, "s5");
    assert_eq!(blocks[0].action_data.len(), 1);
    assert_eq!(blocks[0].action_data[0].account_update_id, 12);
    assert_eq!(blocks[0].action_data[0].data, vec!["7", "8"]);
}

#[test]
fn test_actions_without_state_fail() {
    let reconstructor = ArchiveReconstructor::new(&MAINNET_CONSTANTS);
    let rows = vec![RowBuilder::new("3NKa", "t1").build()];
    assert_eq!(reconstructor.actions(rows, None), Err(ReconstructError::MissingActionState("3NKa".to_string())));
}

#[test]
fn test_inconsistent_account_update_propagates() {
    let reconstructor = ArchiveReconstructor::new(&MAINNET_CONSTANTS);
    let rows = vec![RowBuilder::new("3NKa", "t1").build(), RowBuilder::new("3NKa", "t2").account_update(99, vec![10]).build()];
    assert_eq!(
        reconstructor.events(rows, None),
        Err(ReconstructError::MissingAccountUpdate { account_update_id: 99, transaction_hash: "t2".to_string() })
    );
}

#[test]
fn test_empty_rows() {
    let reconstructor = ArchiveReconstructor::new(&MAINNET_CONSTANTS);
    assert_eq!(reconstructor.events(Vec::new(), None), Ok(Vec::new()));
}

#[test]
fn test_rows_from_json() {
    let json = serde_json::to_string(&vec![RowBuilder::new("3NKa", "t1").field(1, "42").build()]).unwrap();
    let rows: Vec<ArchiveRow> = serde_json::from_str(&json).unwrap();
    let blocks = ArchiveReconstructor::new(&MAINNET_CONSTANTS).events(rows, None).unwrap();
    assert_eq!(blocks[0].event_data[0].data, vec!["42"]);
    let output = serde_json::to_value(&blocks[0]).unwrap();
    assert_eq!(output["blockInfo"]["stateHash"], "3NKa");
    assert_eq!(output["eventData"][0]["transactionInfo"]["hash"], "t1");
}

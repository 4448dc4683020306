//!
//! Request filters handed to the row-fetching collaborator, with the checks which must
//! pass before any row is fetched.
//!

use crate::{
    errors::{InputError, InputResult},
    model::ArchiveRow,
};
use serde::{Deserialize, Serialize};
use zkarchive_consensus_core::ChainStatus;

/// Token id used when a request does not name one
pub const DEFAULT_TOKEN_ID: &str = "wSHV2S4qX9jFsLjQo8r1BsMLH2ZRKsZx6EJd1sbozGPieEC4Jf";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockStatusFilter {
    #[default]
    All,
    Pending,
    Canonical,
}

impl BlockStatusFilter {
    pub fn accepts(self, status: ChainStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == ChainStatus::Pending,
            Self::Canonical => status == ChainStatus::Canonical,
        }
    }
}

fn default_token_id() -> String {
    DEFAULT_TOKEN_ID.to_string()
}

fn validate_range(from: Option<u64>, to: Option<u64>) -> InputResult<()> {
    match (from, to) {
        (Some(from), Some(to)) if to < from => Err(InputError::InvalidRange { from, to }),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilterOptions {
    pub address: String,
    #[serde(default = "default_token_id")]
    pub token_id: String,
    #[serde(default)]
    pub status: BlockStatusFilter,
    /// Lowest block height (inclusive)
    pub from: Option<u64>,
    /// Highest block height (inclusive)
    pub to: Option<u64>,
}

impl EventFilterOptions {
    pub fn new(address: impl Into<String>) -> Self {
        Self { address: address.into(), token_id: default_token_id(), status: BlockStatusFilter::All, from: None, to: None }
    }

    pub fn validate(&self) -> InputResult<()> {
        validate_range(self.from, self.to)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFilterOptions {
    pub address: String,
    #[serde(default = "default_token_id")]
    pub token_id: String,
    #[serde(default)]
    pub status: BlockStatusFilter,
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub from_action_state: Option<String>,
    pub end_action_state: Option<String>,
}

impl ActionFilterOptions {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token_id: default_token_id(),
            status: BlockStatusFilter::All,
            from: None,
            to: None,
            from_action_state: None,
            end_action_state: None,
        }
    }

    pub fn validate(&self) -> InputResult<()> {
        validate_range(self.from, self.to)
    }

    /// Rejects action state checkpoints which `is_known` does not recognize
    pub fn validate_action_states(&self, is_known: impl Fn(&str) -> bool) -> InputResult<()> {
        for state in [&self.from_action_state, &self.end_action_state].into_iter().flatten() {
            if !is_known(state) {
                return Err(InputError::UnknownActionState(state.clone()));
            }
        }
        Ok(())
    }
}

/// Keeps the rows whose block matches the requested chain status
pub fn filter_by_status(rows: impl IntoIterator<Item = ArchiveRow>, status: BlockStatusFilter) -> Vec<ArchiveRow> {
    rows.into_iter().filter(|row| status.accepts(row.chain_status)).collect()
}

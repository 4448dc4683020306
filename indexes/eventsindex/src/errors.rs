use crate::model::RowId;
use thiserror::Error;

/// Upstream data inconsistencies. These are fatal for the request and must not be retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("no matching account update {account_update_id} found in transaction {transaction_hash}")]
    MissingAccountUpdate { account_update_id: RowId, transaction_hash: String },

    #[error("block {0} has no rows")]
    EmptyBlock(String),

    #[error("block {0} carries no action state")]
    MissingActionState(String),
}

pub type ReconstructResult<T> = std::result::Result<T, ReconstructError>;

/// Caller-facing request validation errors, raised before any row is fetched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid range: to ({to}) must be greater than or equal to from ({from})")]
    InvalidRange { from: u64, to: u64 },

    #[error("action state {0} does not exist")]
    UnknownActionState(String),
}

pub type InputResult<T> = std::result::Result<T, InputError>;

pub mod block;
pub mod config;
pub mod errors;

pub use block::{BlockInfo, ChainStatus, ChainTip, TipCandidate};
pub use config::constants::ProtocolConstants;

/// Global slot number, either since genesis or since the last hard fork
pub type Slot = u64;

/// Epoch number derived from a global slot since genesis
pub type Epoch = u64;

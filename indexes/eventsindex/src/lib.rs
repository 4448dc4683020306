//!
//! Reassembles smart-contract events and actions from the flattened rows of the relational chain mirror.
//!
//! One logical event is spread over many rows by array unnesting (one row per field element). The
//! [`reconstruct`] functions undo that flattening; the [`processor::ArchiveReconstructor`] drives them per
//! block and transaction and canonicalizes competing best tips.
//!

pub mod errors;
pub mod model;
pub mod processor;
pub mod query;
pub mod reconstruct;
pub mod test_helpers;

pub use processor::ArchiveReconstructor;

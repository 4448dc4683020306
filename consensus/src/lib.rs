//! Fork choice over archived chain tips.
//!
//! The archive observes several blocks claiming the same height and has to decide which one belongs to the
//! canonical best chain. The rules below reproduce the protocol's own layered ordering:
//!
//! 1. state hash (lexicographic) as the final tie-breaker,
//! 2. the Blake2b digest of the last VRF output,
//! 3. the blockchain length,
//! 4. and, for tips whose forks diverged long ago (see [`processes::range`]), the minimum window density.

pub mod processes;

pub use processes::{chain_selection::ChainSelectionManager, window_density::WindowDensityManager};

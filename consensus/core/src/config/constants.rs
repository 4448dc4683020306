//!
//! Consensus constants which drive chain selection and window density computations.
//!

use crate::{
    Epoch, Slot,
    errors::config::{ConfigError, ConfigResult},
};
use serde::Serialize;

/// Length of the grace period upper bound expressed in milliseconds (3 days)
pub const GRACE_PERIOD_DURATION_MS: u64 = 3 * 24 * 60 * 60 * 1000;

/// Immutable protocol parameters. Built once at start-up (see [`super::load_constants`]) and
/// passed by reference to every component which needs them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProtocolConstants {
    k: u64,
    delta: u64,
    slots_per_epoch: u64,
    slots_per_sub_window: u64,
    sub_windows_per_window: u64,
    /// Slot duration (milliseconds)
    block_window_duration: u64,

    //
    // Derived
    //
    grace_period_end: Slot,
}

pub const MAINNET_CONSTANTS: ProtocolConstants = ProtocolConstants::from_parts(290, 0, 7140, 7, 11, 180_000);

impl ProtocolConstants {
    pub fn new(
        k: u64,
        delta: u64,
        slots_per_epoch: u64,
        slots_per_sub_window: u64,
        sub_windows_per_window: u64,
        block_window_duration: u64,
    ) -> ConfigResult<Self> {
        for (key, value) in [
            ("slots_per_epoch", slots_per_epoch),
            ("slots_per_sub_window", slots_per_sub_window),
            ("sub_windows_per_window", sub_windows_per_window),
            ("block_window_duration", block_window_duration),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroValue(key));
            }
        }
        // The seed update range ends at 2/3 of the epoch, which must be a whole slot
        if slots_per_epoch % 3 != 0 {
            return Err(ConfigError::SlotsPerEpochNotDivisibleByThree(slots_per_epoch));
        }
        Ok(Self::from_parts(k, delta, slots_per_epoch, slots_per_sub_window, sub_windows_per_window, block_window_duration))
    }

    /// Unchecked constructor for compile-time presets. Callers must uphold the checks in [`Self::new`].
    const fn from_parts(
        k: u64,
        delta: u64,
        slots_per_epoch: u64,
        slots_per_sub_window: u64,
        sub_windows_per_window: u64,
        block_window_duration: u64,
    ) -> Self {
        let grace_period_slots = GRACE_PERIOD_DURATION_MS / block_window_duration;
        let grace_period_end = if grace_period_slots < slots_per_epoch { grace_period_slots } else { slots_per_epoch };
        Self { k, delta, slots_per_epoch, slots_per_sub_window, sub_windows_per_window, block_window_duration, grace_period_end }
    }

    pub fn k(&self) -> u64 {
        self.k
    }

    pub fn delta(&self) -> u64 {
        self.delta
    }

    pub fn slots_per_epoch(&self) -> u64 {
        self.slots_per_epoch
    }

    pub fn slots_per_sub_window(&self) -> u64 {
        self.slots_per_sub_window
    }

    pub fn sub_windows_per_window(&self) -> u64 {
        self.sub_windows_per_window
    }

    pub fn block_window_duration(&self) -> u64 {
        self.block_window_duration
    }

    /// First slot (since hard fork) which is no longer part of the grace period
    pub fn grace_period_end(&self) -> Slot {
        self.grace_period_end
    }

    /// Slots within an epoch below this bound belong to the seed update range
    pub fn seed_update_range_end(&self) -> u64 {
        2 * self.slots_per_epoch / 3
    }

    pub fn epoch_of(&self, global_slot_since_genesis: Slot) -> Epoch {
        global_slot_since_genesis / self.slots_per_epoch
    }

    /// Position of a global slot inside its epoch
    pub fn slot_in_epoch(&self, global_slot_since_genesis: Slot) -> u64 {
        global_slot_since_genesis % self.slots_per_epoch
    }

    /// Absolute sub-window index of a global slot
    pub fn sub_window_of(&self, global_slot_since_genesis: Slot) -> u64 {
        global_slot_since_genesis / self.slots_per_sub_window
    }

    /// Sub-window index of a global slot relative to the window ring
    pub fn relative_sub_window_of(&self, global_slot_since_genesis: Slot) -> u64 {
        self.sub_window_of(global_slot_since_genesis) % self.sub_windows_per_window
    }
}

use super::{range::RangeClassifier, vrf::VrfDigest, window_density::WindowDensityManager};
use std::cmp::Ordering;
use zkarchive_consensus_core::{BlockInfo, ChainTip, ProtocolConstants};
use zkarchive_core::trace;

/// Resolves a three-way comparison of candidate against existing, falling back to the
/// previous stage's preference only on an exact tie
#[inline]
fn prefer_candidate(ordering: Ordering, tie_breaker: bool) -> bool {
    match ordering {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => tie_breaker,
    }
}

/// Pairwise fork choice between observed chain tips
#[derive(Clone, Debug)]
pub struct ChainSelectionManager {
    range_classifier: RangeClassifier,
    window_density_manager: WindowDensityManager,
}

impl ChainSelectionManager {
    pub fn new(constants: &ProtocolConstants) -> Self {
        Self { range_classifier: RangeClassifier::new(constants), window_density_manager: WindowDensityManager::new(constants) }
    }

    pub fn range_classifier(&self) -> &RangeClassifier {
        &self.range_classifier
    }

    pub fn window_density_manager(&self) -> &WindowDensityManager {
        &self.window_density_manager
    }

    /// Returns true if `candidate` should replace `existing` as the best tip
    pub fn is_candidate_preferred(&self, existing: &BlockInfo, candidate: &BlockInfo) -> bool {
        let hash_is_bigger = candidate.state_hash > existing.state_hash;

        let vrf_ordering =
            VrfDigest::from_vrf_output(&candidate.last_vrf_output).cmp(&VrfDigest::from_vrf_output(&existing.last_vrf_output));
        let vrf_is_bigger = prefer_candidate(vrf_ordering, hash_is_bigger);

        let length_is_bigger = prefer_candidate(candidate.height.cmp(&existing.height), vrf_is_bigger);

        if self.range_classifier.is_short_range(existing, candidate) {
            return length_is_bigger;
        }

        let max_slot = existing.global_slot_since_genesis.max(candidate.global_slot_since_genesis);
        let existing_density = self.window_density_manager.virtual_min_window_density(existing, max_slot);
        let candidate_density = self.window_density_manager.virtual_min_window_density(candidate, max_slot);
        trace!(
            "Long range fork between {} (density {}) and {} (density {})",
            existing.state_hash,
            existing_density,
            candidate.state_hash,
            candidate_density
        );
        prefer_candidate(candidate_density.cmp(&existing_density), length_is_bigger)
    }

    /// Selects the preferred tip of the two, returning it unchanged
    pub fn select<T: ChainTip>(&self, existing: T, candidate: T) -> T {
        if self.is_candidate_preferred(existing.block_info(), candidate.block_info()) {
            trace!("Chain selection: {} replaces {}", candidate.block_info().state_hash, existing.block_info().state_hash);
            candidate
        } else {
            trace!("Chain selection: {} kept over {}", existing.block_info().state_hash, candidate.block_info().state_hash);
            existing
        }
    }

    /// Folds [`Self::select`] left to right over a set of tips sharing one height.
    /// Returns `None` only for an empty input.
    pub fn chain_select<T: ChainTip>(&self, tips: impl IntoIterator<Item = T>) -> Option<T> {
        tips.into_iter().reduce(|existing, candidate| self.select(existing, candidate))
    }
}

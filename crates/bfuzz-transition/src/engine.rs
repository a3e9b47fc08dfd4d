//! Reference implementation of the [`StateTransition`] trait.

use bfuzz_core::constants::ChainSpec;
use bfuzz_core::error::TransitionError;
use bfuzz_core::traits::StateTransition;
use bfuzz_core::types::{BeaconBlock, BeaconState};
use tracing::trace;

use crate::block_header::process_block_header;

/// The reference state transition.
///
/// Stateless: every call is a pure function of its arguments, so one
/// instance can serve an unbounded number of fuzz iterations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceTransition;

impl ReferenceTransition {
    pub const NAME: &'static str = "reference";

    pub fn new() -> Self {
        Self
    }
}

impl StateTransition for ReferenceTransition {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process_block_header(
        &self,
        pre: &BeaconState,
        block: &BeaconBlock,
        spec: &ChainSpec,
        check_signature: bool,
    ) -> Result<BeaconState, TransitionError> {
        let result = process_block_header(pre, block, spec, check_signature);
        if let Err(e) = &result {
            trace!(
                slot = block.slot,
                proposer = block.proposer_index,
                "block header rejected: {e}"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfuzz_core::genesis;
    use proptest::prelude::*;

    #[test]
    fn reports_its_name() {
        assert_eq!(ReferenceTransition::new().name(), "reference");
    }

    #[test]
    fn delegates_to_process_block_header() {
        let spec = ChainSpec::default();
        let mut pre = genesis::genesis_state(&spec, 3);
        pre.slot = 10;
        let block = genesis::next_block(&pre, 11);
        let via_trait = ReferenceTransition
            .process_block_header(&pre, &block, &spec, false)
            .unwrap();
        let direct = process_block_header(&pre, &block, &spec, false).unwrap();
        assert_eq!(via_trait, direct);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Any slot at or below the state slot is rejected, never accepted.
        #[test]
        fn stale_slots_always_rejected(state_slot in 1u64..1_000_000, back in 0u64..1_000_000) {
            let spec = ChainSpec::default();
            let mut pre = genesis::genesis_state(&spec, 2);
            pre.slot = state_slot;
            let block = genesis::next_block(&pre, state_slot.saturating_sub(back));
            let result = ReferenceTransition.process_block_header(&pre, &block, &spec, false);
            prop_assert!(matches!(result, Err(TransitionError::Rejected(_))));
        }

        /// A linked child with an in-range proposer always advances the slot.
        #[test]
        fn linked_children_advance_slot(
            state_slot in 0u64..1_000_000,
            ahead in 1u64..10_000,
            n in 1u64..16,
        ) {
            let spec = ChainSpec::default();
            let mut pre = genesis::genesis_state(&spec, n);
            pre.slot = state_slot;
            let block = genesis::next_block(&pre, state_slot + ahead);
            let post = ReferenceTransition
                .process_block_header(&pre, &block, &spec, false)
                .unwrap();
            prop_assert_eq!(post.slot, state_slot + ahead);
        }
    }
}

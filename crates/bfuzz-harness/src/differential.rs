//! Differential runner: one input, several state transitions, one verdict.
//!
//! Each registered transition is invoked through its own
//! [`ValidatorAdapter`] with the same configuration. The runner succeeds
//! only if every transition produces the same [`Outcome`]; accepted outcomes
//! must agree byte for byte. Rejection reasons are not compared.

use bfuzz_core::traits::StateTransition;
use bfuzz_transition::ReferenceTransition;
use tracing::warn;

use crate::adapter::ValidatorAdapter;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::harness::decode_input;
use crate::outcome::{self, Outcome};

#[derive(Debug)]
pub struct Differential {
    config: HarnessConfig,
    adapters: Vec<ValidatorAdapter>,
}

impl Differential {
    /// Empty runner. Register transitions with [`add`](Self::add).
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            adapters: Vec::new(),
        }
    }

    /// Runner with the reference transition already registered.
    pub fn with_reference(config: HarnessConfig) -> Self {
        let mut diff = Self::new(config);
        diff.add(Box::new(ReferenceTransition::new()));
        diff
    }

    /// Register another transition.
    pub fn add(&mut self, transition: Box<dyn StateTransition>) -> &mut Self {
        self.adapters.push(ValidatorAdapter::new(transition, &self.config));
        self
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Run `input` through every transition and return the agreed outcome.
    pub fn run(&self, input: &[u8]) -> Result<Outcome, HarnessError> {
        let Some((first, rest)) = self.adapters.split_first() else {
            return Err(HarnessError::NoTransitions);
        };
        let Some(case) = decode_input(input, &self.config)? else {
            return Ok(Outcome::Malformed);
        };

        let expected = outcome::classify(first.invoke(&case)?)?;
        for adapter in rest {
            let got = outcome::classify(adapter.invoke(&case)?)?;
            if got != expected {
                warn!(left = first.name(), right = adapter.name(), "transitions diverged");
                return Err(HarnessError::Divergence {
                    left: first.name().to_string(),
                    right: adapter.name().to_string(),
                    left_outcome: expected.to_string(),
                    right_outcome: got.to_string(),
                });
            }
        }
        Ok(expected)
    }

    /// [`run`](Self::run) under the fuzzing engine's output contract.
    pub fn run_one(&self, input: &[u8]) -> Result<Option<Vec<u8>>, HarnessError> {
        self.run(input).map(Outcome::into_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfuzz_core::constants::ChainSpec;
    use bfuzz_core::error::TransitionError;
    use bfuzz_core::genesis;
    use bfuzz_core::types::{BeaconBlock, BeaconState};

    use crate::test_case::BlockHeaderTestCase;

    /// Accepts everything, advancing the slot without checking linkage.
    struct Permissive;

    impl StateTransition for Permissive {
        fn name(&self) -> &str {
            "permissive"
        }

        fn process_block_header(
            &self,
            pre: &BeaconState,
            block: &BeaconBlock,
            _spec: &ChainSpec,
            _check_signature: bool,
        ) -> Result<BeaconState, TransitionError> {
            Ok(BeaconState { slot: block.slot, ..pre.clone() })
        }
    }

    fn encoded_case(pre_slot: u64, block_slot: u64) -> Vec<u8> {
        let mut pre = genesis::genesis_state(&ChainSpec::default(), 4);
        pre.slot = pre_slot;
        let block = genesis::next_block(&pre, block_slot);
        BlockHeaderTestCase::new(pre, block).encode().unwrap()
    }

    #[test]
    fn empty_runner_errors() {
        let diff = Differential::new(HarnessConfig::default());
        assert!(diff.is_empty());
        assert_eq!(diff.run(&encoded_case(10, 11)), Err(HarnessError::NoTransitions));
    }

    #[test]
    fn identical_transitions_agree() {
        let mut diff = Differential::with_reference(HarnessConfig::default());
        diff.add(Box::new(ReferenceTransition::new()));
        assert_eq!(diff.len(), 2);
        assert!(diff.run(&encoded_case(10, 11)).unwrap().is_accepted());
        assert_eq!(diff.run(&encoded_case(10, 5)).unwrap(), Outcome::Rejected);
    }

    #[test]
    fn accept_versus_reject_diverges() {
        let mut diff = Differential::with_reference(HarnessConfig::default());
        diff.add(Box::new(Permissive));
        let err = diff.run(&encoded_case(10, 5)).unwrap_err();
        let HarnessError::Divergence { left, right, left_outcome, .. } = err else {
            panic!("expected divergence, got {err:?}");
        };
        assert_eq!(left, "reference");
        assert_eq!(right, "permissive");
        assert_eq!(left_outcome, "rejected");
    }

    #[test]
    fn differing_post_states_diverge() {
        let mut diff = Differential::with_reference(HarnessConfig::default());
        diff.add(Box::new(Permissive));
        // Both accept, but Permissive leaves the latest header untouched.
        assert!(matches!(
            diff.run(&encoded_case(10, 11)),
            Err(HarnessError::Divergence { .. })
        ));
    }

    #[test]
    fn malformed_input_short_circuits() {
        let mut diff = Differential::with_reference(HarnessConfig::default());
        diff.add(Box::new(Permissive));
        assert_eq!(diff.run(&[1, 2, 3]).unwrap(), Outcome::Malformed);
        assert_eq!(diff.run_one(&[1, 2, 3]).unwrap(), None);
    }
}

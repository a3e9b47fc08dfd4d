//! Validator invocation adapter.
//!
//! Wraps a [`StateTransition`] with the harness-owned configuration: one
//! rule profile and one signature backend, fixed at construction. Behaviour
//! is then a function of the test case alone.

use std::fmt;

use bfuzz_core::constants::ChainSpec;
use bfuzz_core::error::{BlockHeaderError, TransitionError};
use bfuzz_core::traits::StateTransition;
use bfuzz_core::types::BeaconState;
use tracing::debug;

use crate::config::{HarnessConfig, SignatureBackend};
use crate::error::HarnessError;
use crate::test_case::BlockHeaderTestCase;

/// Result of a validator call that the harness treats as normal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The block was accepted.
    PostState(BeaconState),
    /// The validator judged the block invalid against the pre-state.
    Rejected(BlockHeaderError),
}

/// A state transition bound to a fixed spec and signature backend.
pub struct ValidatorAdapter {
    transition: Box<dyn StateTransition>,
    spec: ChainSpec,
    signatures: SignatureBackend,
}

impl fmt::Debug for ValidatorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorAdapter")
            .field("transition", &self.transition.name())
            .field("profile", &self.spec.profile)
            .field("signatures", &self.signatures)
            .finish()
    }
}

impl ValidatorAdapter {
    pub fn new(transition: Box<dyn StateTransition>, config: &HarnessConfig) -> Self {
        Self {
            transition,
            spec: config.chain_spec(),
            signatures: config.signatures,
        }
    }

    /// Name of the wrapped transition.
    pub fn name(&self) -> &str {
        self.transition.name()
    }

    pub fn spec(&self) -> &ChainSpec {
        &self.spec
    }

    pub fn signatures(&self) -> SignatureBackend {
        self.signatures
    }

    /// Call the validator on `case`.
    ///
    /// A domain rejection becomes [`Invocation::Rejected`]. Any other
    /// validator failure is [`HarnessError::Unclassified`]. Panics inside the
    /// validator are not caught.
    pub fn invoke(&self, case: &BlockHeaderTestCase) -> Result<Invocation, HarnessError> {
        match self.transition.process_block_header(
            &case.pre,
            &case.block,
            &self.spec,
            self.signatures.verifies(),
        ) {
            Ok(post) => Ok(Invocation::PostState(post)),
            Err(TransitionError::Rejected(reason)) => {
                debug!(transition = self.name(), %reason, "block rejected");
                Ok(Invocation::Rejected(reason))
            }
            Err(TransitionError::Internal(reason)) => Err(HarnessError::Unclassified {
                transition: self.name().to_string(),
                reason,
            }),
        }
    }
}

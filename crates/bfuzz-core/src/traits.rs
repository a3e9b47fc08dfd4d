//! Trait interfaces for the harness.
//!
//! [`StateTransition`] is the capability the harness fuzzes. The reference
//! implementation lives in bfuzz-transition; alternative implementations can
//! be plugged into the same harness and compared differentially.

use crate::constants::ChainSpec;
use crate::error::TransitionError;
use crate::types::{BeaconBlock, BeaconState};

/// Block-header processing: validate `block` against `pre` and produce the
/// post-state.
///
/// Implementations must be pure functions of their arguments. A block that
/// breaks a domain rule is reported as [`TransitionError::Rejected`]; any
/// other failure is [`TransitionError::Internal`].
pub trait StateTransition: Send + Sync {
    /// Short identifier used in logs and divergence reports.
    fn name(&self) -> &str;

    /// Apply `block` to `pre` under `spec`.
    ///
    /// When `check_signature` is false the proposer signature is not
    /// inspected at all.
    fn process_block_header(
        &self,
        pre: &BeaconState,
        block: &BeaconBlock,
        spec: &ChainSpec,
        check_signature: bool,
    ) -> Result<BeaconState, TransitionError>;
}

impl<T: StateTransition + ?Sized> StateTransition for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn process_block_header(
        &self,
        pre: &BeaconState,
        block: &BeaconBlock,
        spec: &ChainSpec,
        check_signature: bool,
    ) -> Result<BeaconState, TransitionError> {
        (**self).process_block_header(pre, block, spec, check_signature)
    }
}

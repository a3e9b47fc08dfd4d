//! Block-header processing.
//!
//! [`process_block_header`] validates a candidate block against a pre-state
//! and, if every rule holds, returns the post-state. Rules run in a fixed
//! order so the first violated rule is always the one reported:
//!
//! 1. block slot is after the state slot
//! 2. block slot is after the latest header's slot
//! 3. parent root equals the state's latest block root
//! 4. proposer index is inside the registry
//! 5. proposer is active at the block's epoch
//! 6. proposer is not slashed
//! 7. proposer signature verifies (only when requested)
//!
//! The post-state is the pre-state advanced to the block's slot with the
//! block's header (zero state root) recorded as the latest header.

use bfuzz_core::constants::ChainSpec;
use bfuzz_core::crypto;
use bfuzz_core::error::{BlockHeaderError, TransitionError};
use bfuzz_core::types::{BeaconBlock, BeaconState, Hash256};

/// Validate `block` against `pre` and produce the post-state.
///
/// Domain violations are [`TransitionError::Rejected`]. A zero
/// `slots_per_epoch` or an unencodable body is [`TransitionError::Internal`]:
/// neither can be caused by a well-formed block under a sane spec.
pub fn process_block_header(
    pre: &BeaconState,
    block: &BeaconBlock,
    spec: &ChainSpec,
    check_signature: bool,
) -> Result<BeaconState, TransitionError> {
    // --- Slot ordering ---

    if block.slot <= pre.slot {
        return Err(BlockHeaderError::SlotNotAfterState {
            block: block.slot,
            state: pre.slot,
        }
        .into());
    }

    if block.slot <= pre.latest_block_header.slot {
        return Err(BlockHeaderError::SlotNotAfterParent {
            block: block.slot,
            parent: pre.latest_block_header.slot,
        }
        .into());
    }

    // --- Parent linkage ---

    let expected_parent = pre.latest_block_root();
    if block.parent_root != expected_parent {
        return Err(BlockHeaderError::ParentRootMismatch {
            expected: expected_parent,
            got: block.parent_root,
        }
        .into());
    }

    // --- Proposer ---

    let proposer = usize::try_from(block.proposer_index)
        .ok()
        .and_then(|i| pre.validators.get(i))
        .ok_or(BlockHeaderError::ProposerIndexOutOfBounds {
            index: block.proposer_index,
            len: pre.validators.len(),
        })?;

    let epoch = block.slot.checked_div(spec.slots_per_epoch).ok_or_else(|| {
        TransitionError::Internal(format!(
            "slots_per_epoch is zero in {} profile",
            spec.profile
        ))
    })?;

    if !proposer.is_active_at(epoch) {
        return Err(BlockHeaderError::ProposerInactive {
            index: block.proposer_index,
            epoch,
        }
        .into());
    }

    if proposer.slashed {
        return Err(BlockHeaderError::ProposerSlashed(block.proposer_index).into());
    }

    // --- Header (commits to the body) ---

    let mut header = block
        .header()
        .map_err(|e| TransitionError::Internal(format!("block body: {e}")))?;

    // --- Signature ---

    if check_signature {
        let domain = crypto::proposer_domain(spec, &pre.fork, epoch);
        crypto::verify_header_signature(&header, &block.signature, &proposer.pubkey, &domain)
            .map_err(BlockHeaderError::InvalidSignature)?;
    }

    // --- Post-state ---

    header.state_root = Hash256::ZERO;
    let mut post = pre.clone();
    post.slot = block.slot;
    post.latest_block_header = header;
    Ok(post)
}

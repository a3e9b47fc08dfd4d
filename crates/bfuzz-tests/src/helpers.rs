//! Shared test helpers for scenario and property tests.

use bfuzz_core::constants::ChainSpec;
use bfuzz_core::genesis;
use bfuzz_core::types::{BeaconBlock, BeaconState};
use bfuzz_harness::BlockHeaderTestCase;

/// Number of validators in fixture states.
pub const VALIDATORS: u64 = 8;

/// Fixture state at `slot` with its latest header one slot earlier.
pub fn state_at(slot: u64) -> BeaconState {
    let mut state = genesis::genesis_state(&ChainSpec::default(), VALIDATORS);
    state.slot = slot;
    state.latest_block_header.slot = slot.saturating_sub(1);
    state
}

/// Unsigned child block of `state` at `slot`.
pub fn child(state: &BeaconState, slot: u64) -> BeaconBlock {
    genesis::next_block(state, slot)
}

/// Encode a test case the way a corpus entry is stored.
pub fn encode_case(pre: BeaconState, block: BeaconBlock) -> Vec<u8> {
    BlockHeaderTestCase::new(pre, block)
        .encode()
        .expect("fixture test case encodes")
}

/// Encoded case: state at `pre_slot`, linked child at `block_slot`.
pub fn encoded(pre_slot: u64, block_slot: u64) -> Vec<u8> {
    let pre = state_at(pre_slot);
    let block = child(&pre, block_slot);
    encode_case(pre, block)
}

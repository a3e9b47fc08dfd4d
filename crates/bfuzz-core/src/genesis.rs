//! Deterministic fixtures: validator keys, a genesis state and child blocks.
//!
//! Everything here is a pure function of its arguments, so seeds written to
//! a corpus and states built in tests are reproducible bit for bit.

use crate::constants::{ChainSpec, FAR_FUTURE_EPOCH};
use crate::crypto::{self, KeyPair};
use crate::error::CryptoError;
use crate::types::{BeaconBlock, BeaconBlockBody, BeaconState, Fork, Hash256, Validator};

/// Genesis time of fixture states: December 1, 2020 12:00:23 UTC.
pub const GENESIS_TIME: u64 = 1_606_824_023;

/// Fork version of fixture states.
pub const GENESIS_FORK_VERSION: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

/// Deterministic keypair of validator `index`.
///
/// The secret is `BLAKE3("bfuzz validator" || index_le)`.
pub fn validator_keypair(index: u64) -> KeyPair {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"bfuzz validator");
    hasher.update(&index.to_le_bytes());
    KeyPair::from_secret_bytes(hasher.finalize().into())
}

/// A slot-0 state with `validator_count` active, unslashed validators.
pub fn genesis_state(spec: &ChainSpec, validator_count: u64) -> BeaconState {
    let validators: Vec<Validator> = (0..validator_count)
        .map(|i| Validator {
            pubkey: validator_keypair(i).public_key().to_bytes(),
            effective_balance: spec.max_effective_balance,
            slashed: false,
            activation_epoch: 0,
            exit_epoch: FAR_FUTURE_EPOCH,
        })
        .collect();
    let balances = vec![spec.max_effective_balance; validators.len()];

    BeaconState {
        genesis_time: GENESIS_TIME,
        slot: 0,
        fork: Fork {
            previous_version: GENESIS_FORK_VERSION,
            current_version: GENESIS_FORK_VERSION,
            epoch: 0,
        },
        latest_block_header: Default::default(),
        validators,
        balances,
    }
}

/// Unsigned block at `slot` that extends `state`.
///
/// The proposer is `slot % validators.len()` (0 for an empty registry) and
/// the parent root is the state's latest block root.
pub fn next_block(state: &BeaconState, slot: u64) -> BeaconBlock {
    let proposer_index = slot.checked_rem(state.validators.len() as u64).unwrap_or(0);
    BeaconBlock {
        slot,
        proposer_index,
        parent_root: state.latest_block_root(),
        state_root: Hash256::ZERO,
        body: BeaconBlockBody {
            randao_reveal: vec![0u8; 32],
            eth1_block_hash: Hash256::ZERO,
            graffiti: Hash256(blake3::hash(&slot.to_le_bytes()).into()),
        },
        signature: Vec::new(),
    }
}

/// [`next_block`] signed by its proposer's fixture key.
pub fn signed_next_block(
    state: &BeaconState,
    slot: u64,
    spec: &ChainSpec,
) -> Result<BeaconBlock, CryptoError> {
    let mut block = next_block(state, slot);
    let keypair = validator_keypair(block.proposer_index);
    crypto::sign_block(&mut block, &keypair, &state.fork, spec)?;
    Ok(block)
}

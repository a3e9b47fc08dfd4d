//! Record types: beacon state, blocks, headers and validators.
//!
//! Slots, epochs, indices and balances are `u64` throughout.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::codec;
use crate::constants::{ChainSpec, PUBKEY_BYTES};
use crate::error::CodecError;

/// A 32-byte hash value.
///
/// Used for header hashes (double SHA-256), body roots (BLAKE3) and
/// signing roots (SHA-256).
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes). Used for unset state roots.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Fork versions and the epoch at which the current one took effect.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Fork {
    pub previous_version: [u8; 4],
    pub current_version: [u8; 4],
    pub epoch: u64,
}

impl Fork {
    /// Version in force at `epoch`.
    pub fn version_at(&self, epoch: u64) -> [u8; 4] {
        if epoch < self.epoch {
            self.previous_version
        } else {
            self.current_version
        }
    }
}

/// A registered validator.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct Validator {
    /// Ed25519 public key used to verify proposals.
    pub pubkey: [u8; PUBKEY_BYTES],
    /// Balance counted toward duties, in gwei.
    pub effective_balance: u64,
    /// Whether the validator has been slashed.
    pub slashed: bool,
    /// First epoch the validator is active.
    pub activation_epoch: u64,
    /// First epoch the validator is no longer active.
    pub exit_epoch: u64,
}

impl Validator {
    /// `activation_epoch <= epoch < exit_epoch`.
    pub fn is_active_at(&self, epoch: u64) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }
}

/// Block header as committed to in the state.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct BeaconBlockHeader {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body_root: Hash256,
}

impl BeaconBlockHeader {
    /// Header size in bytes when serialized for hashing (2 u64 fields + 3 * 32-byte hashes).
    const HASH_SIZE: usize = 2 * 8 + 3 * 32;

    /// Compute the header hash (double SHA-256).
    ///
    /// Uses an explicit fixed byte layout: slot || proposer_index ||
    /// parent_root || state_root || body_root, integers little-endian.
    pub fn hash(&self) -> Hash256 {
        let mut data = Vec::with_capacity(Self::HASH_SIZE);
        data.extend_from_slice(&self.slot.to_le_bytes());
        data.extend_from_slice(&self.proposer_index.to_le_bytes());
        data.extend_from_slice(self.parent_root.as_bytes());
        data.extend_from_slice(self.state_root.as_bytes());
        data.extend_from_slice(self.body_root.as_bytes());
        let first = Sha256::digest(&data);
        Hash256(Sha256::digest(first).into())
    }
}

/// Block body. Opaque to header processing beyond its root.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct BeaconBlockBody {
    pub randao_reveal: Vec<u8>,
    pub eth1_block_hash: Hash256,
    pub graffiti: Hash256,
}

impl BeaconBlockBody {
    /// BLAKE3 hash of the canonical encoding.
    pub fn root(&self) -> Result<Hash256, CodecError> {
        let encoded = codec::encode(self)?;
        Ok(Hash256(blake3::hash(&encoded).into()))
    }
}

/// A proposed block: the candidate delta validated against a state.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct BeaconBlock {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body: BeaconBlockBody,
    /// Ed25519 signature (64 bytes) over the signing root. Any length decodes.
    pub signature: Vec<u8>,
}

impl BeaconBlock {
    /// Header committing to this block's body.
    pub fn header(&self) -> Result<BeaconBlockHeader, CodecError> {
        Ok(BeaconBlockHeader {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body_root: self.body.root()?,
        })
    }
}

/// Complete state snapshot before or after a transition.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct BeaconState {
    pub genesis_time: u64,
    pub slot: u64,
    pub fork: Fork,
    pub latest_block_header: BeaconBlockHeader,
    pub validators: Vec<Validator>,
    pub balances: Vec<u64>,
}

impl BeaconState {
    /// Root a child block must name as its parent.
    pub fn latest_block_root(&self) -> Hash256 {
        self.latest_block_header.hash()
    }

    /// Epoch of the state's slot. `None` if `slots_per_epoch` is zero.
    pub fn current_epoch(&self, spec: &ChainSpec) -> Option<u64> {
        self.slot.checked_div(spec.slots_per_epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: 10,
            proposer_index: 3,
            parent_root: Hash256([0x11; 32]),
            state_root: Hash256::ZERO,
            body_root: Hash256([0x22; 32]),
        }
    }

    fn sample_block() -> BeaconBlock {
        BeaconBlock {
            slot: 11,
            proposer_index: 0,
            parent_root: Hash256([0x33; 32]),
            state_root: Hash256::ZERO,
            body: BeaconBlockBody {
                randao_reveal: vec![0xAB; 96],
                eth1_block_hash: Hash256([0x44; 32]),
                graffiti: Hash256::ZERO,
            },
            signature: vec![0u8; 64],
        }
    }

    // --- Hash256 ---

    #[test]
    fn hash256_zero_is_zero() {
        assert!(Hash256::ZERO.is_zero());
        assert_eq!(Hash256::ZERO, Hash256::default());
        assert!(!Hash256([1; 32]).is_zero());
    }

    #[test]
    fn hash256_display_hex() {
        let s = format!("{}", Hash256([0xAB; 32]));
        assert_eq!(s.len(), 64);
        assert_eq!(&s[0..2], "ab");
    }

    // --- Fork / Validator ---

    #[test]
    fn fork_version_switches_at_epoch() {
        let fork = Fork {
            previous_version: [0, 0, 0, 1],
            current_version: [0, 0, 0, 2],
            epoch: 5,
        };
        assert_eq!(fork.version_at(4), [0, 0, 0, 1]);
        assert_eq!(fork.version_at(5), [0, 0, 0, 2]);
    }

    #[test]
    fn validator_active_window_is_half_open() {
        let v = Validator {
            pubkey: [0; 32],
            effective_balance: 0,
            slashed: false,
            activation_epoch: 2,
            exit_epoch: 4,
        };
        assert!(!v.is_active_at(1));
        assert!(v.is_active_at(2));
        assert!(v.is_active_at(3));
        assert!(!v.is_active_at(4));
    }

    // --- Headers ---

    #[test]
    fn header_hash_deterministic() {
        assert_eq!(sample_header().hash(), sample_header().hash());
    }

    #[test]
    fn header_hash_changes_with_slot() {
        let mut other = sample_header();
        other.slot += 1;
        assert_ne!(sample_header().hash(), other.hash());
    }

    #[test]
    fn header_hash_fixed_size_input() {
        let h = sample_header();
        let mut data = Vec::new();
        data.extend_from_slice(&h.slot.to_le_bytes());
        data.extend_from_slice(&h.proposer_index.to_le_bytes());
        data.extend_from_slice(h.parent_root.as_bytes());
        data.extend_from_slice(h.state_root.as_bytes());
        data.extend_from_slice(h.body_root.as_bytes());
        assert_eq!(data.len(), BeaconBlockHeader::HASH_SIZE);
    }

    #[test]
    fn block_header_commits_to_body() {
        let block = sample_block();
        let mut tampered = block.clone();
        tampered.body.graffiti = Hash256([0xFF; 32]);
        assert_ne!(
            block.header().unwrap().body_root,
            tampered.header().unwrap().body_root
        );
    }

    #[test]
    fn block_header_ignores_signature() {
        let block = sample_block();
        let mut resigned = block.clone();
        resigned.signature = vec![0xEE; 64];
        assert_eq!(block.header().unwrap(), resigned.header().unwrap());
    }

    // --- State ---

    #[test]
    fn latest_block_root_is_header_hash() {
        let state = BeaconState {
            latest_block_header: sample_header(),
            ..BeaconState::default()
        };
        assert_eq!(state.latest_block_root(), sample_header().hash());
    }

    #[test]
    fn current_epoch_handles_zero_epoch_length() {
        let state = BeaconState { slot: 65, ..BeaconState::default() };
        let mut spec = ChainSpec::default();
        assert_eq!(state.current_epoch(&spec), Some(2));
        spec.slots_per_epoch = 0;
        assert_eq!(state.current_epoch(&spec), None);
    }

    #[test]
    fn serde_json_round_trip_state() {
        let state = BeaconState {
            slot: 7,
            latest_block_header: sample_header(),
            balances: vec![1, 2, 3],
            ..BeaconState::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: BeaconState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}

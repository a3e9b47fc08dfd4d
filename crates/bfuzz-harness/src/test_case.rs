//! The structured test case decoded from fuzzer input.

use bfuzz_core::codec;
use bfuzz_core::error::CodecError;
use bfuzz_core::types::{BeaconBlock, BeaconState};

/// Pre-state and candidate block, encoded in that field order.
///
/// Only structural decodability is enforced here. Whether `block` is valid
/// against `pre` is exactly what the validator under test decides.
#[derive(Clone, Debug, PartialEq, Eq, bincode::Encode, bincode::Decode)]
pub struct BlockHeaderTestCase {
    pub pre: BeaconState,
    pub block: BeaconBlock,
}

impl BlockHeaderTestCase {
    pub fn new(pre: BeaconState, block: BeaconBlock) -> Self {
        Self { pre, block }
    }

    /// Decode a test case from fuzzer bytes.
    ///
    /// Inputs longer than `max_input_bytes` are refused before any parsing.
    pub fn decode(bytes: &[u8], max_input_bytes: usize) -> Result<Self, CodecError> {
        if bytes.len() > max_input_bytes {
            return Err(CodecError::InputTooLarge {
                size: bytes.len(),
                max: max_input_bytes,
            });
        }
        codec::decode(bytes)
    }

    /// Canonical encoding; the left inverse of [`decode`](Self::decode).
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(self)
    }
}

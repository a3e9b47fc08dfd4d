//! Canonical binary codec for harness records.
//!
//! bincode with the standard configuration (little-endian, varint lengths).
//! Decoding is bounded by [`MAX_ENCODED_BYTES`] and must consume the whole
//! input, so every byte string maps to at most one value.

use bincode::config::{self, Configuration, Limit, LittleEndian, Varint};
use bincode::error::DecodeError;

use crate::constants::MAX_ENCODED_BYTES;
use crate::error::CodecError;

type DecodeConfig = Configuration<LittleEndian, Varint, Limit<MAX_ENCODED_BYTES>>;

fn decode_config() -> DecodeConfig {
    config::standard().with_limit::<MAX_ENCODED_BYTES>()
}

/// Encode a record. Identical values always produce identical bytes.
pub fn encode<T: bincode::Encode>(value: &T) -> Result<Vec<u8>, CodecError> {
    bincode::encode_to_vec(value, config::standard())
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a record, rejecting truncated input and trailing bytes.
pub fn decode<T: bincode::Decode<()>>(bytes: &[u8]) -> Result<T, CodecError> {
    let (value, consumed) =
        bincode::decode_from_slice::<T, _>(bytes, decode_config()).map_err(map_decode_error)?;
    if consumed != bytes.len() {
        return Err(CodecError::TrailingBytes {
            consumed,
            len: bytes.len(),
        });
    }
    Ok(value)
}

fn map_decode_error(err: DecodeError) -> CodecError {
    match err {
        DecodeError::UnexpectedEnd { additional } => CodecError::Truncated { additional },
        DecodeError::LimitExceeded => CodecError::LimitExceeded,
        other => CodecError::Malformed(other.to_string()),
    }
}

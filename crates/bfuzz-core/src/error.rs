//! Error types for the block-header harness.
use thiserror::Error;

use crate::types::Hash256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("truncated input: {additional} more bytes needed")] Truncated { additional: usize },
    #[error("trailing bytes: consumed {consumed} of {len}")] TrailingBytes { consumed: usize, len: usize },
    #[error("input too large: {size} > {max}")] InputTooLarge { size: usize, max: usize },
    #[error("decode limit exceeded")] LimitExceeded,
    #[error("malformed: {0}")] Malformed(String),
    #[error("encode: {0}")] Encode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key bytes")] InvalidPublicKey,
    #[error("invalid signature bytes")] InvalidSignature,
    #[error("signature verification failed")] VerificationFailed,
}

/// Domain rejections raised by block-header processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockHeaderError {
    #[error("block slot {block} not after state slot {state}")] SlotNotAfterState { block: u64, state: u64 },
    #[error("block slot {block} not after parent slot {parent}")] SlotNotAfterParent { block: u64, parent: u64 },
    #[error("parent root mismatch: expected {expected}, got {got}")] ParentRootMismatch { expected: Hash256, got: Hash256 },
    #[error("proposer index out of bounds: {index} >= {len}")] ProposerIndexOutOfBounds { index: u64, len: usize },
    #[error("proposer {index} inactive at epoch {epoch}")] ProposerInactive { index: u64, epoch: u64 },
    #[error("proposer {0} is slashed")] ProposerSlashed(u64),
    #[error("invalid proposer signature: {0}")] InvalidSignature(#[from] CryptoError),
}

/// Failure of a [`StateTransition`](crate::traits::StateTransition).
///
/// Only `Rejected` is a recognized domain outcome. `Internal` marks a
/// validator that failed for a reason outside its rule set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error(transparent)] Rejected(#[from] BlockHeaderError),
    #[error("internal: {0}")] Internal(String),
}

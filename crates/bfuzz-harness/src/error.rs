//! Error types for the harness pipeline.
//!
//! Every variant is a finding: the fuzz target turns an `Err` into a panic so
//! the fuzzing engine records the input. Domain rejections never appear here;
//! they are normal [`Outcome`](crate::Outcome)s.
use bfuzz_core::error::CodecError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("decode failure: {0}")] Decode(#[source] CodecError),
    #[error("unclassified failure in {transition}: {reason}")] Unclassified { transition: String, reason: String },
    #[error("post-state encode failure: {0}")] Encode(#[source] CodecError),
    #[error("{left} and {right} diverged: {left_outcome} vs {right_outcome}")] Divergence { left: String, right: String, left_outcome: String, right_outcome: String },
    #[error("no state transitions registered")] NoTransitions,
}

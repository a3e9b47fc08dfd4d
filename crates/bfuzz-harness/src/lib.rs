//! # bfuzz-harness: Fuzz harness for block-header processing.
//!
//! The pipeline a fuzzing engine drives once per input:
//!
//! ```text
//! bytes --decode--> BlockHeaderTestCase --invoke--> PostState | Rejected --classify--> Outcome
//! ```
//!
//! [`run_one`] is the entry point. It returns `Ok(Some(bytes))` with the
//! encoded post-state when the block is accepted, `Ok(None)` when the block
//! is rejected (or, under [`DecodePolicy::Skip`], the input is malformed),
//! and `Err` for anything the fuzzing engine should record as a finding.

pub mod adapter;
pub mod config;
pub mod differential;
pub mod error;
pub mod harness;
pub mod outcome;
pub mod test_case;

pub use adapter::{Invocation, ValidatorAdapter};
pub use config::{DecodePolicy, HarnessConfig, SignatureBackend};
pub use differential::Differential;
pub use error::HarnessError;
pub use harness::Harness;
pub use outcome::Outcome;
pub use test_case::BlockHeaderTestCase;

/// Run one input through the process-wide [`Harness::global`].
pub fn run_one(input: &[u8]) -> Result<Option<Vec<u8>>, HarnessError> {
    Harness::global().run_one(input)
}

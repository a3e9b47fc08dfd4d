//! Outcome classification and the output contract.

use std::fmt;

use bfuzz_core::codec;

use crate::adapter::Invocation;
use crate::error::HarnessError;

/// Normal result of one harness run.
///
/// `Rejected` and `Malformed` both produce no output, but stay distinct so
/// a decoder problem is never mistaken for a validator verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Canonical encoding of the post-state.
    Accepted(Vec<u8>),
    /// The validator rejected the block.
    Rejected,
    /// The input was not a well-formed test case.
    Malformed,
}

impl Outcome {
    /// Collapse to the fuzzing engine's contract: bytes or absent.
    pub fn into_output(self) -> Option<Vec<u8>> {
        match self {
            Self::Accepted(bytes) => Some(bytes),
            Self::Rejected | Self::Malformed => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted(bytes) => {
                let digest = blake3::hash(bytes);
                write!(
                    f,
                    "accepted({} bytes, blake3 {})",
                    bytes.len(),
                    hex::encode(&digest.as_bytes()[..8])
                )
            }
            Self::Rejected => f.write_str("rejected"),
            Self::Malformed => f.write_str("malformed"),
        }
    }
}

/// Map a validator result onto an [`Outcome`], encoding accepted post-states.
pub fn classify(invocation: Invocation) -> Result<Outcome, HarnessError> {
    match invocation {
        Invocation::PostState(post) => codec::encode(&post)
            .map(Outcome::Accepted)
            .map_err(HarnessError::Encode),
        Invocation::Rejected(_) => Ok(Outcome::Rejected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfuzz_core::error::BlockHeaderError;
    use bfuzz_core::types::BeaconState;

    #[test]
    fn post_state_is_encoded() {
        let post = BeaconState { slot: 11, ..BeaconState::default() };
        let outcome = classify(Invocation::PostState(post.clone())).unwrap();
        let Outcome::Accepted(bytes) = outcome else {
            panic!("expected accepted outcome");
        };
        assert_eq!(codec::decode::<BeaconState>(&bytes).unwrap(), post);
    }

    #[test]
    fn rejection_has_no_output() {
        let outcome = classify(Invocation::Rejected(BlockHeaderError::ProposerSlashed(0))).unwrap();
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(outcome.into_output(), None);
    }

    #[test]
    fn malformed_has_no_output() {
        assert_eq!(Outcome::Malformed.into_output(), None);
    }

    #[test]
    fn absent_differs_from_empty_bytes() {
        assert_eq!(Outcome::Accepted(Vec::new()).into_output(), Some(Vec::new()));
        assert_ne!(Outcome::Accepted(Vec::new()), Outcome::Rejected);
    }

    #[test]
    fn display_summarises() {
        assert_eq!(Outcome::Rejected.to_string(), "rejected");
        assert_eq!(Outcome::Malformed.to_string(), "malformed");
        assert!(Outcome::Accepted(vec![1, 2, 3]).to_string().starts_with("accepted(3 bytes"));
    }
}

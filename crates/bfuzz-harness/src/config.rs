//! Harness configuration.
//!
//! Provides [`HarnessConfig`] with the defaults the fuzz targets run under:
//! the mainnet profile, signature verification disabled, malformed inputs
//! skipped quietly. Build a variant with struct-update syntax.

use std::fmt;
use std::str::FromStr;

use bfuzz_core::constants::{ChainSpec, MAX_ENCODED_BYTES, SpecProfile};

/// Which signature backend the validator runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureBackend {
    /// Proposer signatures are never inspected.
    #[default]
    Disabled,
    /// Proposer signatures are verified with Ed25519.
    Ed25519,
}

impl SignatureBackend {
    /// Whether the validator should be asked to check signatures.
    pub fn verifies(&self) -> bool {
        matches!(self, Self::Ed25519)
    }
}

/// What happens when the input bytes are not a well-formed test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodePolicy {
    /// Report [`Outcome::Malformed`](crate::Outcome::Malformed): no output, no finding.
    #[default]
    Skip,
    /// Fail with [`HarnessError::Decode`](crate::HarnessError::Decode) so the
    /// fuzzing engine records the input.
    Abort,
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skip => "skip",
            Self::Abort => "abort",
        })
    }
}

impl FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown decode policy: {other}")),
        }
    }
}

/// Configuration for a harness instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Rule profile every invocation runs under.
    pub profile: SpecProfile,
    /// Signature backend handed to the validator.
    pub signatures: SignatureBackend,
    /// Handling of inputs that fail to decode.
    pub decode_policy: DecodePolicy,
    /// Inputs longer than this are treated as malformed without decoding.
    pub max_input_bytes: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            profile: SpecProfile::Mainnet,
            signatures: SignatureBackend::Disabled,
            decode_policy: DecodePolicy::Skip,
            max_input_bytes: MAX_ENCODED_BYTES,
        }
    }
}

impl HarnessConfig {
    /// Constants of the configured profile.
    pub fn chain_spec(&self) -> ChainSpec {
        self.profile.chain_spec()
    }
}

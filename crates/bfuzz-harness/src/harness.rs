//! The harness entry point.
//!
//! One call runs `Decoding → Invoking → Classifying → Done` to completion.
//! Nothing survives between calls except the configuration captured when the
//! [`Harness`] was built, so a fuzzing engine can drive a single instance for
//! an unbounded number of iterations.

use std::sync::OnceLock;

use bfuzz_core::traits::StateTransition;
use bfuzz_transition::ReferenceTransition;
use tracing::{debug, trace};

use crate::adapter::ValidatorAdapter;
use crate::config::{DecodePolicy, HarnessConfig};
use crate::error::HarnessError;
use crate::outcome::{self, Outcome};
use crate::test_case::BlockHeaderTestCase;

static GLOBAL: OnceLock<Harness> = OnceLock::new();

/// Decode → invoke → classify pipeline around one state transition.
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    adapter: ValidatorAdapter,
}

impl Harness {
    /// Harness around the reference transition.
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_transition(config, Box::new(ReferenceTransition::new()))
    }

    /// Harness around any transition, e.g. an alternative implementation
    /// under differential test.
    pub fn with_transition(config: HarnessConfig, transition: Box<dyn StateTransition>) -> Self {
        let adapter = ValidatorAdapter::new(transition, &config);
        Self { config, adapter }
    }

    /// The process-wide harness, built on first use with
    /// [`HarnessConfig::default`] (signature verification disabled).
    ///
    /// Safe to call any number of times; later calls return the same instance.
    pub fn global() -> &'static Harness {
        GLOBAL.get_or_init(|| {
            let harness = Harness::new(HarnessConfig::default());
            debug!(?harness, "initialized global harness");
            harness
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn adapter(&self) -> &ValidatorAdapter {
        &self.adapter
    }

    /// Run one input and report the classified outcome.
    pub fn run(&self, input: &[u8]) -> Result<Outcome, HarnessError> {
        let Some(case) = decode_input(input, &self.config)? else {
            return Ok(Outcome::Malformed);
        };

        trace!(slot = case.block.slot, pre_slot = case.pre.slot, "invoking");
        let invocation = self.adapter.invoke(&case)?;

        trace!("classifying");
        outcome::classify(invocation)
    }

    /// Run one input under the fuzzing engine's contract: the encoded
    /// post-state, or `None` for no output.
    pub fn run_one(&self, input: &[u8]) -> Result<Option<Vec<u8>>, HarnessError> {
        self.run(input).map(Outcome::into_output)
    }
}

/// Decode `input`, applying the configured [`DecodePolicy`].
///
/// `Ok(None)` means the input is malformed and the policy says skip.
pub(crate) fn decode_input(
    input: &[u8],
    config: &HarnessConfig,
) -> Result<Option<BlockHeaderTestCase>, HarnessError> {
    trace!(len = input.len(), "decoding");
    match BlockHeaderTestCase::decode(input, config.max_input_bytes) {
        Ok(case) => Ok(Some(case)),
        Err(e) => match config.decode_policy {
            DecodePolicy::Skip => {
                trace!("malformed input skipped: {e}");
                Ok(None)
            }
            DecodePolicy::Abort => Err(HarnessError::Decode(e)),
        },
    }
}

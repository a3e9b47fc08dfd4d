#![no_main]

use std::sync::OnceLock;

use bfuzz_harness::{Differential, HarnessConfig};
use libfuzzer_sys::fuzz_target;

static DIFFERENTIAL: OnceLock<Differential> = OnceLock::new();

// Every registered transition must agree on each input.
fuzz_target!(|data: &[u8]| {
    let diff = DIFFERENTIAL.get_or_init(|| Differential::with_reference(HarnessConfig::default()));
    if let Err(e) = diff.run_one(data) {
        panic!("differential block header harness: {e}");
    }
});

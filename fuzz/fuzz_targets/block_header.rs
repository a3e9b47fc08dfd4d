#![no_main]

use libfuzzer_sys::fuzz_target;

// Rejected blocks and malformed inputs produce no output. Anything else the
// harness reports is a finding.
fuzz_target!(|data: &[u8]| {
    if let Err(e) = bfuzz_harness::run_one(data) {
        panic!("block header harness: {e}");
    }
});

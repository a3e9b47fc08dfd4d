//! Integration test suite for the block-header fuzz harness.
//!
//! The tests drive the harness exactly as a fuzzing engine would: raw bytes
//! in, bytes or nothing out.

pub mod helpers;

//! # bfuzz-transition: Reference block-header processing.
//!
//! This crate implements the [`StateTransition`](bfuzz_core::traits::StateTransition)
//! trait with the rule set the harness fuzzes: slot ordering, parent linkage,
//! proposer bounds and status, and (optionally) the proposer signature.

pub mod block_header;
pub mod engine;

pub use block_header::process_block_header;
pub use engine::ReferenceTransition;

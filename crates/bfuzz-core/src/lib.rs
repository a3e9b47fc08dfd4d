//! # bfuzz-core
//! Record types, codec, crypto and traits shared by the block-header fuzz harness.

pub mod codec;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod genesis;
pub mod traits;
pub mod types;

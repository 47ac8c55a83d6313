//! Infrastructure layer - concrete implementations of the domain seams
//!
//! This layer contains:
//! - Keccak-256 selector hashing
//! - ABI scanning and calldata decoding using alloy-json-abi / alloy-dyn-abi

pub mod abi;

pub use abi::{AbiScanner, CalldataDecoder};

//! ABI infrastructure - keccak hashing, alloy-backed decoding and ABI file scanning

mod decoder;
mod hasher;
mod scanner;

pub use decoder::{AlloyParamDecoder, CalldataDecoder};
pub use hasher::Keccak256Hasher;
pub use scanner::{AbiScanner, ScanReport};

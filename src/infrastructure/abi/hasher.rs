//! Keccak-256 selector hashing

use alloy_primitives::{keccak256, B256};

use crate::domain::abi::SelectorHasher;

/// Keccak-256, the digest Solidity derives selectors from
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl SelectorHasher for Keccak256Hasher {
    fn digest(&self, data: &[u8]) -> B256 {
        keccak256(data)
    }
}

//! Address validation, checksums (EIP-55) and short display forms

use alloy_primitives::Address;

use super::ToolResult;
use crate::core::Action;

/// Convert address to checksummed format
pub fn checksum(input: Option<String>) -> Action {
    let Some(input) = input else {
        return Action::warn("Usage: checksum <address>");
    };

    match checksum_address(input.trim()) {
        Some(checksummed) => ToolResult::new("Checksum")
            .add("address", checksummed)
            .add("short", truncate_address(input.trim()))
            .into_action(),
        None => Action::error("Invalid address (expected 0x + 40 hex chars)"),
    }
}

/// Exactly `0x` followed by 40 hex digits
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .map(|digits| digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// EIP-55 form of a valid address
pub fn checksum_address(address: &str) -> Option<String> {
    if !is_valid_address(address) {
        return None;
    }
    address
        .parse::<Address>()
        .ok()
        .map(|parsed| parsed.to_checksum(None))
}

/// First 7 and last 5 characters, e.g. `0x12345...cdef0`
pub fn truncate_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let start: String = address.chars().take(7).collect();
    let end: String = address
        .chars()
        .rev()
        .take(5)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    format!("{}...{}", start, end)
}

//! Function selector calculation and calldata slicing

use alloy_primitives::U256;

use super::ToolResult;
use crate::core::Action;
use crate::domain::abi::calldata;
use crate::domain::abi::{DecodeError, SelectorHasher};

pub use crate::domain::abi::calldata::embedded_address as extract_embedded_address;

/// Compute function selector from signature
pub fn selector(hasher: &impl SelectorHasher, input: Option<String>) -> Action {
    let Some(input) = input else {
        return Action::warn("Usage: selector <function_signature>");
    };

    let sig = input.trim();
    if sig.is_empty() {
        return Action::warn("Usage: selector transfer(address,uint256)");
    }

    let normalized = normalize_signature(sig);
    let selector_hex = function_selector(hasher, &normalized);

    ToolResult::new("Selector")
        .add("signature", normalized)
        .add("selector", selector_hex)
        .into_action()
}

/// `0x`-prefixed selector of a signature, lowercase hex
pub fn function_selector(hasher: &impl SelectorHasher, signature: &str) -> String {
    let normalized = normalize_signature(signature);
    format!("0x{}", hex::encode(hasher.selector(&normalized)))
}

/// Selector segment of calldata: `0x` plus the first 8 hex digits
pub fn extract_selector(calldata: &str) -> Result<&str, DecodeError> {
    calldata::split_calldata(calldata).map(|(selector, _)| selector)
}

/// First parameter word read as a uint256, rendered in decimal
pub fn extract_value_from_calldata(calldata: &str) -> Option<String> {
    let word = calldata::first_word(calldata)?;
    U256::from_str_radix(word, 16).ok().map(|value| value.to_string())
}

fn normalize_signature(sig: &str) -> String {
    // Drop anything after the parameter list, e.g. a `returns (...)` clause
    let sig = match parameter_list_end(sig) {
        Some(end) => &sig[..=end],
        None => sig,
    };

    sig.replace(' ', "")
}

/// Byte index of the `)` closing the first parameter list
fn parameter_list_end(sig: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in sig.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 1 => return Some(idx),
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

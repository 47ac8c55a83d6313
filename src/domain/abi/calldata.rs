//! Slicing of hex-encoded calldata strings

use alloy_primitives::Address;

use super::DecodeError;

/// Length of `0x` plus the 8 hex digits of a selector
pub const SELECTOR_HEX_LEN: usize = 10;

/// Selector value that triggers re-derivation from the whole payload
pub const SENTINEL_SELECTOR: [u8; 4] = [0; 4];

/// End of the first 32-byte parameter word in the hex string
const FIRST_WORD_END: usize = SELECTOR_HEX_LEN + 64;

/// Split calldata into its selector (`0x` + 8 hex digits) and parameter hex.
pub fn split_calldata(calldata: &str) -> Result<(&str, &str), DecodeError> {
    if calldata.len() < SELECTOR_HEX_LEN {
        return Err(DecodeError::CalldataTooShort {
            len: calldata.len(),
        });
    }
    if !calldata.is_ascii() || !(calldata.starts_with("0x") || calldata.starts_with("0X")) {
        return Err(DecodeError::InvalidCalldata(calldata.to_string()));
    }
    Ok(calldata.split_at(SELECTOR_HEX_LEN))
}

/// Parse a `0x`-prefixed selector string into its four bytes
pub fn parse_selector(selector_hex: &str) -> Result<[u8; 4], DecodeError> {
    let digits = selector_hex
        .strip_prefix("0x")
        .or_else(|| selector_hex.strip_prefix("0X"))
        .unwrap_or(selector_hex);

    let mut selector = [0u8; 4];
    hex::decode_to_slice(digits, &mut selector)
        .map_err(|_| DecodeError::InvalidCalldata(selector_hex.to_string()))?;
    Ok(selector)
}

/// Hex digits of the first parameter word, if the calldata has one
pub fn first_word(calldata: &str) -> Option<&str> {
    calldata
        .get(SELECTOR_HEX_LEN..FIRST_WORD_END)
        .filter(|word| word.is_ascii())
}

/// Address held in the low 20 bytes of the first parameter word.
///
/// Proxy-style calls carry their real destination there.
pub fn embedded_address(calldata: &str) -> Option<Address> {
    let word = first_word(calldata)?;
    format!("0x{}", &word[24..]).parse().ok()
}

/// Bytes hashed when the selector is the zero sentinel: the decoded payload
/// when the whole string is valid hex, otherwise the raw string.
pub fn payload_bytes(calldata: &str) -> Vec<u8> {
    let digits = calldata
        .strip_prefix("0x")
        .or_else(|| calldata.strip_prefix("0X"));
    match digits.map(hex::decode) {
        Some(Ok(bytes)) => bytes,
        _ => calldata.as_bytes().to_vec(),
    }
}

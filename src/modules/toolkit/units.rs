//! Unit display: Wei / Gwei / DMD picked from the size of the raw value

use super::ToolResult;
use crate::core::Action;
use crate::domain::{Amount, AmountError};

/// Name of the native coin
pub const COIN_UNIT: &str = "DMD";

/// Decimals of the native coin
pub const COIN_DECIMALS: u32 = 18;

const GWEI_DECIMALS: u32 = 9;

/// Show a raw (wei) value in its display unit and in every unit
pub fn units(input: Option<String>) -> Action {
    let Some(input) = input else {
        return Action::warn("Usage: units <wei>");
    };

    let wei: Amount = match input.trim().parse() {
        Ok(wei) => wei,
        Err(e) => return Action::error(format!("Parse error: {}", e)),
    };

    ToolResult::new("Units")
        .add("display", format_crypto_unit_value(&wei))
        .add("wei", wei.to_string())
        .add("gwei", wei.scale_down(GWEI_DECIMALS).to_string())
        .add(COIN_UNIT.to_lowercase(), wei.scale_down(COIN_DECIMALS).to_string())
        .into_action()
}

/// Decimals implied by the length of the raw value
pub fn decimals_for_unit_length(value: &Amount) -> u32 {
    match value.integer_digits() {
        len if len >= COIN_DECIMALS as usize => COIN_DECIMALS,
        len if len >= GWEI_DECIMALS as usize => GWEI_DECIMALS,
        _ => 0,
    }
}

/// Unit name implied by the length of the raw value
pub fn crypto_unit_name(value: &Amount) -> &'static str {
    match decimals_for_unit_length(value) {
        COIN_DECIMALS => COIN_UNIT,
        GWEI_DECIMALS => "Gwei",
        _ => "Wei",
    }
}

/// Raw value scaled to its unit, e.g. `1500000000000000000` -> `1.5 DMD`
///
/// Values below the Gwei threshold are already in wei and print as is.
pub fn format_crypto_unit_value(value: &Amount) -> String {
    let scaled = value.scale_down(decimals_for_unit_length(value));
    format!("{} {}", scaled, crypto_unit_name(value))
}

/// Coin amount as typed by a user (e.g. `1.5`) converted to wei
pub fn parse_coin_amount(input: &str) -> Result<Amount, AmountError> {
    let coins: Amount = input.parse()?;
    coins
        .scale_up(COIN_DECIMALS)
        .ok_or_else(|| AmountError::Overflow(input.trim().to_string()))
}

/// Raw wei value shown in whole coins, e.g. `2500000000000000000` -> `2.5 DMD`
pub fn format_coin(wei: &Amount) -> String {
    format!("{} {}", wei.scale_down(COIN_DECIMALS), COIN_UNIT)
}

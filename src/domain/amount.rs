//! Arbitrary-precision decimal amounts
//!
//! Token amounts and governance ranges arrive as decimal strings (sometimes as
//! plain JSON numbers) and routinely exceed what an `f64` can hold exactly.
//! Everything that compares or scales such values goes through [`Amount`].

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits kept by [`Amount`]
pub const FRACTION_DIGITS: u32 = 18;

/// Errors produced while parsing an [`Amount`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("negative amount: {0}")]
    Negative(String),
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("too many decimal places ({digits}, max {FRACTION_DIGITS}): {value}")]
    TooPrecise { value: String, digits: usize },
    #[error("amount out of range: {0}")]
    Overflow(String),
}

/// Non-negative decimal with [`FRACTION_DIGITS`] fractional digits.
///
/// Stored as a scaled 512-bit integer, so every `uint256` value fits with its
/// full fractional part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U512);

impl Amount {
    pub const ZERO: Self = Self(U512::ZERO);

    /// Whole-number amount
    pub fn from_integer(value: U256) -> Self {
        Self(U512::from(value) * scale())
    }

    /// Integer part, truncating any fraction
    pub fn integer_part(&self) -> U512 {
        self.0 / scale()
    }

    /// Fractional part as a scaled integer in `0..10^18`
    fn fraction_part(&self) -> U512 {
        self.0 % scale()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.fraction_part().is_zero()
    }

    /// The value as a `uint256`, if it is a whole number that fits
    pub fn to_u256(&self) -> Option<U256> {
        if !self.is_integer() {
            return None;
        }
        U256::checked_from_limbs_slice(self.integer_part().as_limbs())
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Divide by `10^decimals`; digits beyond the kept precision are dropped
    pub fn scale_down(&self, decimals: u32) -> Self {
        Self(self.0 / ten_pow(decimals))
    }

    /// Multiply by `10^decimals`
    pub fn scale_up(&self, decimals: u32) -> Option<Self> {
        self.0.checked_mul(ten_pow(decimals)).map(Self)
    }

    /// Number of digits in the integer part, ignoring leading zeros
    ///
    /// Zero has no significant digits and yields 0.
    pub fn integer_digits(&self) -> usize {
        let integer = self.integer_part();
        if integer.is_zero() {
            0
        } else {
            integer.to_string().len()
        }
    }

    /// Position of `self` within `[min, max]` in hundredths of a percent.
    ///
    /// Values outside the range are clamped; a degenerate range yields 0.
    pub fn basis_points_within(&self, min: &Self, max: &Self) -> u64 {
        let Some(span) = max.0.checked_sub(min.0).filter(|span| !span.is_zero()) else {
            return 0;
        };
        let clamped = (*self).clamp(*min, *max);
        let offset = clamped.0 - min.0;
        // round half up to two decimals of a percent
        let doubled = offset * U512::from(20_000u64) + span;
        let rounded = doubled / (span * U512::from(2u64));
        u64::try_from(rounded).unwrap_or(10_000)
    }
}

fn scale() -> U512 {
    ten_pow(FRACTION_DIGITS)
}

fn ten_pow(exp: u32) -> U512 {
    U512::from(10u64).pow(U512::from(exp))
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self::from_integer(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::from_integer(U256::from(value))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(AmountError::Negative(trimmed.to_string()));
        }
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (unsigned, ""),
        };

        let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (integer.is_empty() && fraction.is_empty()) || !is_digits(integer) || !is_digits(fraction)
        {
            return Err(AmountError::Invalid(trimmed.to_string()));
        }

        if fraction.len() > FRACTION_DIGITS as usize {
            return Err(AmountError::TooPrecise {
                value: trimmed.to_string(),
                digits: fraction.len(),
            });
        }

        let padding = "0".repeat(FRACTION_DIGITS as usize - fraction.len());
        let digits = format!("{}{}{}", integer, fraction, padding);
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::ZERO);
        }

        U512::from_str_radix(digits, 10)
            .map(Self)
            .map_err(|_| AmountError::Overflow(trimmed.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let integer = self.integer_part();
        let fraction = self.fraction_part();
        if fraction.is_zero() {
            return write!(f, "{}", integer);
        }

        let digits = fraction.to_string();
        let padded = format!(
            "{}{}",
            "0".repeat(FRACTION_DIGITS as usize - digits.len()),
            digits
        );
        write!(f, "{}.{}", integer, padded.trim_end_matches('0'))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // JSON numbers keep their literal text, so wei values above u64 stay exact
        let text = match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => text,
            serde_json::Value::Number(number) => number.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected a decimal amount, got {}",
                    other
                )))
            }
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

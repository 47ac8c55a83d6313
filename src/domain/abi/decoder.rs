//! Decoded call model and the seams the calldata decoder is built on

use std::fmt;

use alloy_primitives::{Address, Bytes, B256, I256, U256};
use thiserror::Error;

use super::ParamSpec;

/// Key under which the resolved function name is shown
pub const FUNCTION_NAME_KEY: &str = "Function Name";

/// Errors raised while decoding calldata
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("calldata too short: need at least 10 characters (0x + 4-byte selector), got {len}")]
    CalldataTooShort { len: usize },
    #[error("calldata must be 0x-prefixed hex: {0}")]
    InvalidCalldata(String),
    #[error("no known contract at {target} (embedded address: {embedded})")]
    UnresolvedTarget { target: String, embedded: String },
    #[error("unsupported parameter type '{kind}' for '{name}'")]
    UnsupportedType { name: String, kind: String },
    #[error("failed to decode parameters ({types}): {source}")]
    Parameters {
        types: String,
        #[source]
        source: alloy_dyn_abi::Error,
    },
}

/// A decoded argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Address(Address),
    Uint(U256),
    Int(I256),
    Bool(bool),
    Bytes(Bytes),
    Text(String),
    List(Vec<DecodedValue>),
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{}", address.to_checksum(None)),
            Self::Uint(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::Text(text) => write!(f, "{}", text),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(","))
            }
        }
    }
}

/// A decoded function argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArg {
    /// Parameter name, or its position when the ABI leaves it unnamed
    pub name: String,
    /// Solidity type (e.g., "address", "uint256")
    pub kind: String,
    pub value: DecodedValue,
}

/// Result of decoding a function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    pub function_name: String,
    /// Full function signature (e.g., "transfer(address,uint256)")
    pub signature: String,
    /// Name of the catalog the function was found in
    pub catalog: String,
    pub arguments: Vec<DecodedArg>,
}

impl DecodedCall {
    /// Look up an argument value by parameter name
    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    /// Display rows: the function name first, then one row per argument
    pub fn entries(&self) -> Vec<(String, String)> {
        std::iter::once((FUNCTION_NAME_KEY.to_string(), self.function_name.clone()))
            .chain(
                self.arguments
                    .iter()
                    .map(|arg| (arg.name.clone(), arg.value.to_string())),
            )
            .collect()
    }
}

/// Digest primitive used to derive selectors.
///
/// Injected into the decoder rather than reached for globally, so tests can
/// substitute their own.
pub trait SelectorHasher: Send + Sync {
    /// 32-byte digest of `data`
    fn digest(&self, data: &[u8]) -> B256;

    /// First four bytes of the digest of a signature string
    fn selector(&self, signature: &str) -> [u8; 4] {
        let digest = self.digest(signature.as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }
}

/// ABI parameter decoder.
///
/// Decodes the parameter segment of calldata (everything after the selector)
/// against an ordered parameter list. Implementations must fail rather than
/// return a partial result.
pub trait ParamDecoder: Send + Sync {
    fn decode_params(&self, inputs: &[ParamSpec], data: &[u8])
        -> Result<Vec<DecodedValue>, DecodeError>;
}

//! Human readable names and help text for governable setters

use crate::domain::abi::calldata;
use crate::domain::abi::{DecodeError, InterfaceCatalog, SelectorHasher};

const UNKNOWN_FUNCTION: &str = "Unknown function";

/// Display name and help text for a setter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub parameter_name: String,
    pub parameter_description: String,
}

/// `setDelegatorMinStake(uint256)` -> `Set delegator min stake`
pub fn format_function_name(function: &str) -> String {
    let name = match (function.find('('), function.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            format!("{}{}", &function[..open], &function[close + 1..])
        }
        _ => function.to_string(),
    };

    let mut spaced = String::with_capacity(name.len() + 8);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    let lowered = spaced.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Help text for a governable setter, empty for anything else
pub fn parameter_description(function_name: &str) -> &'static str {
    match function_name {
        "setCreateProposalFee" => "Fee required to create a governance proposal.",
        "setDelegatorMinStake" => "Minimum stake required for a delegator to participate.",
        "setMinimumGasPrice" => "The lowest gas price allowed for transactions.",
        "setBlockGasLimit" => "Maximum gas allowed per block.",
        "setGovernancePotShareNominator" => {
            "The portion of the governance pot allocated to rewards."
        }
        "setReportDisallowPeriod" => {
            "Timeframe during which a node announces maintenance to avoid penalties."
        }
        _ => "",
    }
}

/// Describe the setter `calldata` calls on a contract with `catalog`.
///
/// The literal selector is matched; a miss yields `Unknown function`.
pub fn function_info(
    hasher: &impl SelectorHasher,
    catalog: &InterfaceCatalog,
    calldata: &str,
) -> Result<FunctionInfo, DecodeError> {
    let (selector_hex, _) = calldata::split_calldata(calldata)?;
    let selector = calldata::parse_selector(selector_hex)?;

    let matching = catalog
        .functions()
        .find(|function| hasher.selector(&function.signature()) == selector);

    Ok(match matching {
        Some(function) => FunctionInfo {
            parameter_name: format_function_name(&function.signature()),
            parameter_description: parameter_description(&function.name).to_string(),
        },
        None => FunctionInfo {
            parameter_name: UNKNOWN_FUNCTION.to_string(),
            parameter_description: String::new(),
        },
    })
}

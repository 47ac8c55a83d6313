//! Proposal action preview: decode outcome to what the view shows

use tracing::debug;

use crate::core::Action;
use crate::domain::abi::{ContractDirectory, ParamDecoder, SelectorHasher};
use crate::infrastructure::abi::CalldataDecoder;

const UNKNOWN_FUNCTION: &str = "Unknown function";

/// Decode one proposal action for display.
///
/// A decoded call becomes rows with `Function Name` first; an unknown
/// selector is an info toast, any error an error toast.
pub fn preview_call<H: SelectorHasher, P: ParamDecoder>(
    decoder: &CalldataDecoder<H, P>,
    directory: &ContractDirectory,
    target: &str,
    calldata: &str,
) -> Action {
    match decoder.decode_call_data(directory, target, calldata) {
        Ok(Some(call)) => Action::Show {
            title: call.signature.clone(),
            rows: call.entries(),
        },
        Ok(None) => Action::info(UNKNOWN_FUNCTION),
        Err(err) => {
            debug!("preview of call to {} failed: {}", target, err);
            Action::error(err.to_string())
        }
    }
}

/// Preview every action of a proposal, in order
pub fn preview_actions<H: SelectorHasher, P: ParamDecoder>(
    decoder: &CalldataDecoder<H, P>,
    directory: &ContractDirectory,
    targets: &[String],
    calldatas: &[String],
) -> Vec<Action> {
    targets
        .iter()
        .zip(calldatas)
        .map(|(target, calldata)| preview_call(decoder, directory, target, calldata))
        .collect()
}

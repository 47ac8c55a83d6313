//! Calldata decoder implementation using alloy-dyn-abi

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, Bytes};
use tracing::{debug, trace};

use crate::domain::abi::calldata::{self, SENTINEL_SELECTOR};
use crate::domain::abi::{
    ContractDirectory, DecodeError, DecodedArg, DecodedCall, DecodedValue, FunctionEntry,
    InterfaceCatalog, ParamDecoder, ParamSpec, SelectorHasher,
};

use super::Keccak256Hasher;

/// Parameter decoder backed by alloy-dyn-abi
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyParamDecoder;

impl ParamDecoder for AlloyParamDecoder {
    fn decode_params(
        &self,
        inputs: &[ParamSpec],
        data: &[u8],
    ) -> Result<Vec<DecodedValue>, DecodeError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let types: Vec<DynSolType> = inputs
            .iter()
            .map(|param| {
                DynSolType::parse(&param.kind).map_err(|_| DecodeError::UnsupportedType {
                    name: param.name.clone(),
                    kind: param.kind.clone(),
                })
            })
            .collect::<Result<_, _>>()?;

        // Decode the arguments as one parameter sequence
        let decoded = DynSolType::Tuple(types)
            .abi_decode_params(data)
            .map_err(|source| DecodeError::Parameters {
                types: inputs
                    .iter()
                    .map(|param| param.kind.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                source,
            })?;

        Ok(match decoded {
            DynSolValue::Tuple(values) => values.into_iter().map(into_decoded_value).collect(),
            other => vec![into_decoded_value(other)],
        })
    }
}

fn into_decoded_value(value: DynSolValue) -> DecodedValue {
    match value {
        DynSolValue::Address(address) => DecodedValue::Address(address),
        DynSolValue::Bool(b) => DecodedValue::Bool(b),
        DynSolValue::Int(i, _) => DecodedValue::Int(i),
        DynSolValue::Uint(u, _) => DecodedValue::Uint(u),
        DynSolValue::FixedBytes(word, size) => {
            DecodedValue::Bytes(Bytes::copy_from_slice(&word[..size.min(32)]))
        }
        DynSolValue::Function(function) => {
            DecodedValue::Bytes(Bytes::copy_from_slice(function.as_slice()))
        }
        DynSolValue::Bytes(bytes) => DecodedValue::Bytes(Bytes::from(bytes)),
        DynSolValue::String(s) => DecodedValue::Text(s),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            DecodedValue::List(items.into_iter().map(into_decoded_value).collect())
        }
        #[allow(unreachable_patterns)]
        other => DecodedValue::Text(format!("{:?}", other)),
    }
}

/// Turns a target address plus raw calldata into a [`DecodedCall`]
#[derive(Debug, Clone, Default)]
pub struct CalldataDecoder<H = Keccak256Hasher, P = AlloyParamDecoder> {
    hasher: H,
    params: P,
}

impl CalldataDecoder {
    /// Decoder with keccak-256 selectors and alloy parameter decoding
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: SelectorHasher, P: ParamDecoder> CalldataDecoder<H, P> {
    pub fn with_parts(hasher: H, params: P) -> Self {
        Self { hasher, params }
    }

    /// Selector the calldata dispatches on.
    ///
    /// The zero sentinel is replaced by the leading bytes of the digest of
    /// the whole payload.
    pub fn selector_of(&self, calldata: &str) -> Result<[u8; 4], DecodeError> {
        let (selector_hex, _) = calldata::split_calldata(calldata)?;
        let selector = calldata::parse_selector(selector_hex)?;
        if selector != SENTINEL_SELECTOR {
            return Ok(selector);
        }

        let digest = self.hasher.digest(&calldata::payload_bytes(calldata));
        let derived = [digest[0], digest[1], digest[2], digest[3]];
        debug!(
            "zero selector, derived 0x{} from payload digest",
            hex::encode(derived)
        );
        Ok(derived)
    }

    /// First function whose signature hashes to `selector`.
    ///
    /// Catalogs are scanned in order, entries within a catalog in ABI order.
    pub fn find_function<'a>(
        &self,
        selector: [u8; 4],
        catalogs: &[&'a InterfaceCatalog],
    ) -> Option<(&'a InterfaceCatalog, &'a FunctionEntry)> {
        catalogs.iter().find_map(|catalog| {
            catalog
                .functions()
                .find(|function| {
                    let signature = function.signature();
                    let candidate = self.hasher.selector(&signature);
                    trace!(
                        "{}: {} -> 0x{}",
                        catalog.name,
                        signature,
                        hex::encode(candidate)
                    );
                    candidate == selector
                })
                .map(|function| (*catalog, function))
        })
    }

    /// Decode `calldata` sent to `target`.
    ///
    /// The contract is resolved from `target` first, then from the address
    /// embedded in the first parameter word. Returns `Ok(None)` when no
    /// catalog knows the selector.
    pub fn decode_call_data(
        &self,
        directory: &ContractDirectory,
        target: &str,
        calldata: &str,
    ) -> Result<Option<DecodedCall>, DecodeError> {
        let selector = self.selector_of(calldata)?;

        let embedded = calldata::embedded_address(calldata);
        let candidates: Vec<Address> = [target.trim().parse::<Address>().ok(), embedded]
            .into_iter()
            .flatten()
            .collect();

        let contract = directory.resolve(&candidates).ok_or_else(|| {
            DecodeError::UnresolvedTarget {
                target: target.to_string(),
                embedded: embedded
                    .map(|address| address.to_checksum(None))
                    .unwrap_or_else(|| "none".to_string()),
            }
        })?;
        debug!("resolved {} to contract {}", target, contract.name);

        let catalogs = directory.search_order(contract);
        let Some((catalog, function)) = self.find_function(selector, &catalogs) else {
            debug!(
                "selector 0x{} not found in {} catalogs",
                hex::encode(selector),
                catalogs.len()
            );
            return Ok(None);
        };

        self.decode_with(catalog, function, calldata).map(Some)
    }

    /// Decode the parameter segment of `calldata` against a known function
    pub fn decode_with(
        &self,
        catalog: &InterfaceCatalog,
        function: &FunctionEntry,
        calldata: &str,
    ) -> Result<DecodedCall, DecodeError> {
        let (_, params_hex) = calldata::split_calldata(calldata)?;
        let data = hex::decode(params_hex)
            .map_err(|_| DecodeError::InvalidCalldata(calldata.to_string()))?;

        let values = self.params.decode_params(&function.inputs, &data)?;

        // Build decoded arguments
        let arguments = function
            .inputs
            .iter()
            .zip(values)
            .enumerate()
            .map(|(idx, (param, value))| {
                let name = if param.name.trim().is_empty() {
                    idx.to_string()
                } else {
                    param.name.clone()
                };
                DecodedArg {
                    name,
                    kind: param.kind.clone(),
                    value,
                }
            })
            .collect();

        Ok(DecodedCall {
            function_name: function.name.clone(),
            signature: function.signature(),
            catalog: catalog.name.clone(),
            arguments,
        })
    }
}

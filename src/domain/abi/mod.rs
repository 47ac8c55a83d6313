//! ABI domain models and contracts
//!
//! This module defines the catalog types and the seams (hashing, parameter
//! decoding) of the calldata decoder, independent of the alloy-backed
//! implementations in `infrastructure::abi`.

pub mod calldata;
mod catalog;
mod decoder;
mod directory;

pub use catalog::{
    ConstructorEntry, EventEntry, FunctionEntry, InterfaceCatalog, InterfaceEntry, ParamSpec,
};
pub use decoder::{
    DecodeError, DecodedArg, DecodedCall, DecodedValue, ParamDecoder, SelectorHasher,
    FUNCTION_NAME_KEY,
};
pub use directory::{ContractDirectory, DeployedContract};

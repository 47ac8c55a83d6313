pub mod abi;
pub mod amount;

pub use amount::{Amount, AmountError};

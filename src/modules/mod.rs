//! Dashboard features
//!
//! - dao: governance home summary and historic indexing status
//! - preview: proposal action preview built on the calldata decoder
//! - proposal: proposal draft validation and encoding
//! - slider: discrete range slider for governable parameters
//! - pools: validator pool table rows and pagination
//! - toolkit: small helpers (selectors, addresses, units, dates)

pub mod dao;
pub mod pools;
pub mod preview;
pub mod proposal;
pub mod slider;
pub mod toolkit;

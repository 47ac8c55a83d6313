//! Governance dashboard helpers: calldata decoding for proposal previews,
//! discrete parameter sliders, proposal drafts and validator pool tables.

pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod modules;

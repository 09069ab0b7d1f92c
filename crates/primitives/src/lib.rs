//! This crate contains general types and pure functions that need to be shared across multiple
//! crates in the bridge.
//!
//! It lies at the bottom of the crate-hierarchy in this workspace i.e., it does not depend on any
//! other crate in this workspace.

#[macro_use]
mod macros;

pub mod buf;
pub mod errors;
pub mod types;
pub mod units;

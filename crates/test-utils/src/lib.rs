//! This crate provides test-utilities related to external libraries.
//!
//! These utilities are mostly used to generate arbitrary values and well-formed source-chain
//! transactions for testing purposes.

pub mod bitcoin;
pub mod tx;

//! This crate provides the primitives for reading source-chain transactions and proving their
//! inclusion in a block without running a full node.
//!
//! Transactions are handled in their split wire form (see [`RawTransaction`]): the version, the
//! input vector, the output vector and the locktime. All reads go through a bounds-checked
//! [`ByteCursor`](cursor::ByteCursor), so a truncated or adversarial buffer always fails with a
//! [`ParseError`](errors::ParseError) instead of reading out of bounds.

pub mod compact_size;
pub mod cursor;
pub mod errors;
pub mod raw_tx;
pub mod tx_parser;

mod tx_inclusion_proof;
mod utils;

pub use raw_tx::RawTransaction;
pub use tx_inclusion_proof::*;
pub use utils::*;

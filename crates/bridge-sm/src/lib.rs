//! This crate implements the registry that tracks the peg-in/peg-out lifecycle of the bridge.
//!
//! The registry is a pair of interlocking automata. Every deposit accepted on the source chain
//! becomes a [`PeginRecord`](state::PeginRecord) that can be withdrawn by exactly one operator at
//! a time. Operators back each withdrawal attempt with a bond held on the host ledger and advance
//! the attempt by presenting source-chain transactions that were committed to ahead of time,
//! each proven against a block attested by an SPV oracle.

pub mod auth;
pub mod collaborators;
pub mod errors;
pub mod events;
pub mod inmemory;
pub mod policy;
pub mod registry;
pub mod shared;
pub mod state;

//! This crate contains the consensus-critical parameters that dictate the behavior of the bridge
//! registry in a way that ensures that every party can come to a consensus on the state of the
//! bridge.

pub mod bridge;
pub mod default;
pub mod errors;
pub mod prelude;
pub mod stake;

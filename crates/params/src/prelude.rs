//! Re-exports of the commonly used parameter types.

pub use crate::{bridge::BridgeParams, errors::ParamsError, stake::StakeParams};

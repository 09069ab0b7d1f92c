//! Parameters for the operator collateral.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};

use crate::default::MIN_OPERATOR_STAKE;

/// The collateral requirements that every operator record must satisfy when it is posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeParams {
    /// The minimum collateral [`Amount`] in source-chain units.
    pub min_operator_stake: Amount,
}

impl Default for StakeParams {
    fn default() -> Self {
        Self {
            min_operator_stake: MIN_OPERATOR_STAKE,
        }
    }
}

//! Collateral policy for operators.

use bitcoin::Amount;
use bitvm_bridge_params::stake::StakeParams;

/// Decides whether an operator's collateral is sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakePolicy {
    min_stake: Amount,
}

impl StakePolicy {
    /// Creates a policy that requires at least `min_stake`.
    pub const fn new(min_stake: Amount) -> Self {
        Self { min_stake }
    }

    /// Returns the minimum accepted collateral.
    pub const fn min_stake(&self) -> Amount {
        self.min_stake
    }

    /// Whether `amount` satisfies the minimum.
    pub fn is_valid_stake(&self, amount: Amount) -> bool {
        amount >= self.min_stake
    }
}

impl From<&StakeParams> for StakePolicy {
    fn from(params: &StakeParams) -> Self {
        Self::new(params.min_operator_stake)
    }
}

impl Default for StakePolicy {
    fn default() -> Self {
        Self::from(&StakeParams::default())
    }
}

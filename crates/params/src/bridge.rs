//! The top-level parameters of a bridge registry.

use bitvm_bridge_primitives::types::EvmAddress;
use serde::{Deserialize, Serialize};

use crate::{errors::ParamsError, stake::StakeParams};

/// The parameters a registry is constructed with.
///
/// These are fixed for the lifetime of the registry. The relayer is the single identity that may
/// post peg-ins and operator data. The escrow is the host-ledger account that holds operator bonds
/// while a withdrawal is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeParams {
    /// The relayer account.
    pub relayer: EvmAddress,

    /// The account that holds bonds in escrow.
    pub escrow: EvmAddress,

    /// The collateral requirements for operators.
    #[serde(default)]
    pub stake: StakeParams,
}

impl BridgeParams {
    /// Creates new parameters with the default stake requirements.
    pub fn new(relayer: EvmAddress, escrow: EvmAddress) -> Self {
        Self {
            relayer,
            escrow,
            stake: StakeParams::default(),
        }
    }

    /// Checks that the parameters describe a usable registry.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.relayer.is_zero() {
            return Err(ParamsError::ZeroRelayer);
        }

        if self.escrow.is_zero() {
            return Err(ParamsError::ZeroEscrow);
        }

        if self.escrow == self.relayer {
            return Err(ParamsError::EscrowIsRelayer);
        }

        if self.stake.min_operator_stake.to_sat() == 0 {
            return Err(ParamsError::ZeroStake);
        }

        Ok(())
    }
}

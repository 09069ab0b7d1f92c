//! Errors for the bridge parameters.

use thiserror::Error;

/// Error while validating the bridge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// The relayer account is the zero address.
    #[error("relayer must not be the zero address")]
    ZeroRelayer,

    /// The escrow account is the zero address.
    #[error("escrow must not be the zero address")]
    ZeroEscrow,

    /// The escrow account coincides with the relayer account.
    #[error("escrow and relayer must be distinct accounts")]
    EscrowIsRelayer,

    /// The minimum stake is zero, which would accept operators without collateral.
    #[error("minimum operator stake must be non-zero")]
    ZeroStake,
}

//! Errors related to the operations of the registry.

use bitcoin::{Amount, Txid};
use bitvm_bridge_params::errors::ParamsError;
use bitvm_bridge_primitives::{
    errors::ConversionError,
    types::{BitcoinBlockHeight, EvmAddress},
};
use bitvm_bridge_proof_primitives::errors::ParseError;
use ethnum::U256;
use thiserror::Error;

use crate::auth::Role;

/// Errors that can occur while querying the SPV oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// No attested block is known at the requested height.
    #[error("no attested block at height {0}")]
    UnknownHeight(BitcoinBlockHeight),

    /// The oracle could not be reached.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while moving tokens on the host ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The account does not hold enough tokens.
    #[error("account {account} holds {available} but {needed} is required")]
    InsufficientBalance {
        /// The account being debited.
        account: EvmAddress,
        /// The amount required.
        needed: U256,
        /// The amount held.
        available: U256,
    },

    /// The spender has not been approved for enough tokens.
    #[error("{spender} may spend {available} from {owner} but {needed} is required")]
    InsufficientAllowance {
        /// The account that owns the tokens.
        owner: EvmAddress,
        /// The account spending on the owner's behalf.
        spender: EvmAddress,
        /// The amount required.
        needed: U256,
        /// The amount approved.
        available: U256,
    },

    /// A balance would exceed the representable range.
    #[error("balance of {0} overflows")]
    Overflow(EvmAddress),
}

/// Errors that can occur in the registry.
///
/// Every error aborts the operation that raised it and leaves the registry exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The caller does not hold the role the operation requires.
    #[error("caller {caller} is not authorized; requires {required}")]
    Authorization {
        /// The caller of the operation.
        caller: EvmAddress,
        /// The role the operation requires.
        required: Role,
    },

    /// The operation is not valid for the current status of a record.
    #[error("invalid state: {0}")]
    State(String),

    /// The transaction has already been consumed.
    #[error("transaction {0} has already been used")]
    Replay(Txid),

    /// The inclusion proof does not reduce to the attested root.
    #[error("transaction {txid} is not included in the block at height {height}")]
    MerkleProof {
        /// The transaction whose inclusion was checked.
        txid: Txid,
        /// The height of the attested block.
        height: BitcoinBlockHeight,
    },

    /// A supplied value does not match the committed one.
    #[error("{what} mismatch: expected {expected}, found {found}")]
    Mismatch {
        /// What was compared.
        what: &'static str,
        /// The committed value.
        expected: String,
        /// The supplied value.
        found: String,
    },

    /// The operator collateral is below the minimum.
    #[error("stake {stake} is below the minimum of {minimum}")]
    Policy {
        /// The posted collateral.
        stake: Amount,
        /// The minimum collateral.
        minimum: Amount,
    },

    /// A raw transaction could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The SPV oracle failed.
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// The token ledger failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// An amount could not be converted between units.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// The registry was constructed with unusable parameters.
    #[error("invalid params: {0}")]
    Params(#[from] ParamsError),
}

impl RegistryError {
    pub(crate) fn state(reason: impl Into<String>) -> Self {
        Self::State(reason.into())
    }

    pub(crate) fn mismatch(
        what: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Self::Mismatch {
            what,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// The result type for operations in the registry.
pub type RegistryResult<T> = Result<T, RegistryError>;

//! The external services the registry depends on.
//!
//! Calls into these are blocking and their results are treated as committed.

use bitvm_bridge_primitives::{
    buf::Buf32,
    types::{BitcoinBlockHeight, EvmAddress},
};
use ethnum::U256;

use crate::{
    errors::{LedgerError, OracleError},
    state::{OperatorRecord, WithdrawRecord},
};

/// Supplies the attested Merkle root of source-chain blocks.
pub trait SpvOracle {
    /// Returns the Merkle root committed by the finalized block at `height`.
    fn block_hash(&self, height: BitcoinBlockHeight) -> Result<Buf32, OracleError>;
}

/// The fungible-token ledger that custodies the pegged asset.
///
/// The ledger keeps no notion of a caller: the registry names every account it moves tokens
/// through.
pub trait TokenLedger {
    /// Moves `amount` out of `from`, an account the registry controls, to `to`.
    fn transfer(
        &mut self,
        from: EvmAddress,
        to: EvmAddress,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` from `owner` to `to`, spending the allowance `owner` granted to `spender`.
    fn transfer_from(
        &mut self,
        spender: EvmAddress,
        owner: EvmAddress,
        to: EvmAddress,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Creates `amount` new tokens owned by `to`.
    fn mint(&mut self, to: EvmAddress, amount: U256) -> Result<(), LedgerError>;
}

/// Callbacks invoked when a bond changes hands.
///
/// They run after every check of the operation has passed and cannot fail.
// TODO: burn the forfeited bond once host-ledger state proofs are available.
pub trait BondHook {
    /// Called when a kickoff is accepted.
    fn on_kickoff(&mut self, _withdrawal: &WithdrawRecord, _operator: &OperatorRecord) {}

    /// Called when a withdrawal claims its peg-in.
    fn on_complete(&mut self, _withdrawal: &WithdrawRecord, _operator: &OperatorRecord) {}

    /// Called when a withdrawal is disproved.
    fn on_disproved(&mut self, _withdrawal: &WithdrawRecord, _operator: &OperatorRecord) {}
}

/// A [`BondHook`] that does nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopBondHook;

impl BondHook for NoopBondHook {}

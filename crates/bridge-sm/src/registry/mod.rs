//! The registry that ties deposits, operator commitments and withdrawal attempts together.
//!
//! Every mutating operation follows the same shape: authorize the caller, check every
//! precondition against the current tables, perform the single ledger call (if any), and only
//! then apply the state change. A failure at any step before the state change leaves the
//! registry untouched.

mod operator;
mod pegin;
mod queries;
mod withdraw;

#[cfg(test)]
mod tests;

use std::mem;

use bitcoin::Txid;
use bitvm_bridge_params::bridge::BridgeParams;
use bitvm_bridge_primitives::types::{BitcoinBlockHeight, GraphId, InstanceId};
use bitvm_bridge_proof_primitives::TxInclusionProof;
use tracing::trace;

use crate::{
    collaborators::{BondHook, NoopBondHook, SpvOracle, TokenLedger},
    errors::{RegistryError, RegistryResult},
    events::RegistryEvent,
    policy::StakePolicy,
    state::{OperatorRecord, PeginRecord, RegistryState, WithdrawRecord},
};

/// The bridge registry.
///
/// Generic over the SPV oracle `O`, the token ledger `L` and the bond hook `H`.
#[derive(Debug)]
pub struct Registry<O, L, H = NoopBondHook> {
    params: BridgeParams,
    policy: StakePolicy,
    state: RegistryState,
    oracle: O,
    ledger: L,
    hook: H,
    events: Vec<RegistryEvent>,
}

impl<O, L> Registry<O, L>
where
    O: SpvOracle,
    L: TokenLedger,
{
    /// Creates an empty registry.
    ///
    /// Fails if `params` do not validate.
    pub fn new(params: BridgeParams, oracle: O, ledger: L) -> RegistryResult<Self> {
        Self::from_state(params, RegistryState::new(), oracle, ledger)
    }

    /// Restores a registry from a snapshot of its tables.
    ///
    /// Fails if `params` do not validate.
    pub fn from_state(
        params: BridgeParams,
        state: RegistryState,
        oracle: O,
        ledger: L,
    ) -> RegistryResult<Self> {
        params.validate()?;
        let policy = StakePolicy::from(&params.stake);

        Ok(Self {
            params,
            policy,
            state,
            oracle,
            ledger,
            hook: NoopBondHook,
            events: Vec::new(),
        })
    }
}

impl<O, L, H> Registry<O, L, H>
where
    O: SpvOracle,
    L: TokenLedger,
    H: BondHook,
{
    /// Replaces the bond hook.
    pub fn with_bond_hook<H2: BondHook>(self, hook: H2) -> Registry<O, L, H2> {
        Registry {
            params: self.params,
            policy: self.policy,
            state: self.state,
            oracle: self.oracle,
            ledger: self.ledger,
            hook,
            events: self.events,
        }
    }

    /// Returns the parameters the registry was created with.
    pub const fn params(&self) -> &BridgeParams {
        &self.params
    }

    /// Returns the stake policy.
    pub const fn policy(&self) -> &StakePolicy {
        &self.policy
    }

    /// Returns the tables of the registry.
    pub const fn state(&self) -> &RegistryState {
        &self.state
    }

    /// Returns the SPV oracle.
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns the SPV oracle mutably.
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    /// Returns the token ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the token ledger mutably.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Returns the bond hook.
    pub const fn hook(&self) -> &H {
        &self.hook
    }

    /// Takes the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        mem::take(&mut self.events)
    }

    /// Checks that `txid` is included in the block attested at `height`.
    fn verify_inclusion(
        &self,
        txid: Txid,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<()> {
        let root = self.oracle.block_hash(height)?;

        if !proof.verify(txid, root) {
            return Err(RegistryError::MerkleProof { txid, height });
        }

        trace!(%txid, %height, position = proof.position(), "verified inclusion");

        Ok(())
    }

    fn pegin_record(&self, instance_id: &InstanceId) -> RegistryResult<&PeginRecord> {
        self.state
            .pegins
            .get(instance_id)
            .ok_or_else(|| RegistryError::state(format!("unknown pegin {instance_id}")))
    }

    fn operator_record(&self, graph_id: &GraphId) -> RegistryResult<&OperatorRecord> {
        self.state
            .operators
            .get(graph_id)
            .ok_or_else(|| RegistryError::state(format!("unknown graph {graph_id}")))
    }

    fn withdraw_record(&self, graph_id: &GraphId) -> RegistryResult<&WithdrawRecord> {
        self.state
            .withdrawals
            .get(graph_id)
            .ok_or_else(|| RegistryError::state(format!("no withdrawal for graph {graph_id}")))
    }
}

//! Read-only views over the registry.
//!
//! The enumerations scan the tables on every call; they are conveniences for off-chain callers
//! and carry no invariant of their own.

use bitcoin::{secp256k1::XOnlyPublicKey, Txid};
use bitvm_bridge_primitives::types::{GraphId, InstanceId};
use ethnum::U256;

use super::Registry;
use crate::state::{OperatorRecord, PeginRecord, PeginStatus, WithdrawRecord};

impl<O, L, H> Registry<O, L, H> {
    /// Returns the peg-in posted under `instance_id`.
    pub fn pegin(&self, instance_id: &InstanceId) -> Option<&PeginRecord> {
        self.state.pegins.get(instance_id)
    }

    /// Returns the operator graph posted under `graph_id`.
    pub fn operator(&self, graph_id: &GraphId) -> Option<&OperatorRecord> {
        self.state.operators.get(graph_id)
    }

    /// Returns the latest withdrawal attempt made through `graph_id`.
    pub fn withdrawal(&self, graph_id: &GraphId) -> Option<&WithdrawRecord> {
        self.state.withdrawals.get(graph_id)
    }

    /// Returns the ids of all posted peg-ins.
    pub fn instance_ids(&self) -> Vec<InstanceId> {
        self.state.pegins.keys().copied().collect()
    }

    /// Returns the ids of the peg-ins that can currently be withdrawn.
    pub fn withdrawable_instances(&self) -> Vec<InstanceId> {
        self.state
            .pegins
            .iter()
            .filter(|(_, pegin)| pegin.status == PeginStatus::Withdrawable)
            .map(|(instance_id, _)| *instance_id)
            .collect()
    }

    /// Returns the graphs posted for the operator with `pubkey`.
    pub fn graph_ids_by_operator_pubkey(&self, pubkey: &XOnlyPublicKey) -> Vec<GraphId> {
        self.state
            .operators
            .iter()
            .filter(|(_, operator)| operator.data.operator_pubkey == *pubkey)
            .map(|(graph_id, _)| *graph_id)
            .collect()
    }

    /// Returns the graphs of the operator with `pubkey` whose attempt is initialized or being
    /// processed.
    pub fn pending_withdrawals_by_operator_pubkey(&self, pubkey: &XOnlyPublicKey) -> Vec<GraphId> {
        self.graph_ids_by_operator_pubkey(pubkey)
            .into_iter()
            .filter(|graph_id| {
                self.state
                    .withdrawals
                    .get(graph_id)
                    .is_some_and(|withdrawal| withdrawal.status.is_pending())
            })
            .collect()
    }

    /// Whether `txid` already backs a peg-in.
    pub fn is_txid_used(&self, txid: &Txid) -> bool {
        self.state.used_txids.contains(txid)
    }

    /// Returns the sum of the bonds held for pending attempts.
    ///
    /// Bonds of completed or disproved attempts stay with the escrow account but are no longer
    /// counted here.
    pub fn escrow_balance(&self) -> U256 {
        self.state
            .withdrawals
            .values()
            .filter(|withdrawal| withdrawal.status.is_pending())
            .fold(U256::ZERO, |acc, withdrawal| acc + withdrawal.bond)
    }
}

//! The events emitted by successful registry operations.

use bitcoin::{Amount, Txid};
use bitvm_bridge_primitives::types::{EvmAddress, GraphId, InstanceId};
use ethnum::U256;
use serde::{Deserialize, Serialize};

/// The path through which a withdrawal was claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimPath {
    /// Claimed through the take1 transaction without a challenge.
    Happy,
    /// Claimed through the take2 transaction after a challenge.
    Unhappy,
}

/// A state transition that has been applied to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A deposit was accepted and the destination credited.
    PeginPosted {
        /// The peg-in instance.
        instance_id: InstanceId,
        /// The peg-in transaction.
        txid: Txid,
        /// The deposited amount.
        amount: Amount,
        /// The credited account.
        destination: EvmAddress,
    },

    /// An operator graph was attached to a peg-in.
    OperatorPosted {
        /// The peg-in instance.
        instance_id: InstanceId,
        /// The operator graph.
        graph_id: GraphId,
    },

    /// A withdrawal attempt locked a peg-in.
    WithdrawInitialized {
        /// The peg-in instance.
        instance_id: InstanceId,
        /// The operator graph.
        graph_id: GraphId,
        /// The escrowed bond.
        bond: U256,
    },

    /// A withdrawal attempt was canceled.
    WithdrawCanceled {
        /// The peg-in instance.
        instance_id: InstanceId,
        /// The operator graph.
        graph_id: GraphId,
    },

    /// The kickoff of a withdrawal attempt was accepted.
    WithdrawProceeded {
        /// The peg-in instance.
        instance_id: InstanceId,
        /// The operator graph.
        graph_id: GraphId,
        /// The kickoff transaction.
        kickoff_txid: Txid,
    },

    /// A withdrawal attempt claimed its peg-in.
    WithdrawCompleted {
        /// The peg-in instance.
        instance_id: InstanceId,
        /// The operator graph.
        graph_id: GraphId,
        /// The claim path taken.
        path: ClaimPath,
    },

    /// A withdrawal attempt was disproved.
    WithdrawDisproved {
        /// The peg-in instance.
        instance_id: InstanceId,
        /// The operator graph.
        graph_id: GraphId,
        /// The dispute transaction.
        dispute_txid: Txid,
    },
}

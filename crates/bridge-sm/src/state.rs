//! The records tracked by the registry and the statuses they move through.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use bitcoin::{secp256k1::XOnlyPublicKey, Amount, Txid};
use bitvm_bridge_primitives::types::{BitcoinBlockHeight, EvmAddress, GraphId, InstanceId};
use ethnum::U256;
use serde::{Deserialize, Serialize};

/// The status of a peg-in.
///
/// A peg-in that has not been posted has no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeginStatus {
    /// The deposit is accepted and no withdrawal is in flight.
    Withdrawable,
    /// A withdrawal attempt holds the peg-in.
    Locked,
    /// A withdrawal completed; the peg-in cannot be withdrawn again.
    Claimed,
}

impl Display for PeginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PeginStatus::Withdrawable => "Withdrawable",
            PeginStatus::Locked => "Locked",
            PeginStatus::Claimed => "Claimed",
        };

        write!(f, "{status}")
    }
}

/// The status of a withdrawal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawStatus {
    /// The bond is escrowed and the peg-in is locked; waiting for the kickoff.
    Initialized,
    /// The kickoff was accepted; waiting for a claim or a disproof.
    Processing,
    /// The attempt was withdrawn before the kickoff.
    Canceled,
    /// The operator claimed the peg-in.
    Complete,
    /// The operator's assertion was disproved.
    Disproved,
}

impl WithdrawStatus {
    /// Whether the attempt still holds the peg-in.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Initialized | Self::Processing)
    }
}

impl Display for WithdrawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            WithdrawStatus::Initialized => "Initialized",
            WithdrawStatus::Processing => "Processing",
            WithdrawStatus::Canceled => "Canceled",
            WithdrawStatus::Complete => "Complete",
            WithdrawStatus::Disproved => "Disproved",
        };

        write!(f, "{status}")
    }
}

/// An accepted deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeginRecord {
    /// The id of the peg-in transaction.
    pub txid: Txid,

    /// The height of the block the peg-in was proven against.
    pub height: BitcoinBlockHeight,

    /// The deposited amount.
    pub amount: Amount,

    /// The host-ledger account that was credited.
    pub destination: EvmAddress,

    /// The current status.
    pub status: PeginStatus,

    /// The operator graphs attached to this peg-in.
    pub graph_ids: BTreeSet<GraphId>,
}

/// The source-chain transaction ids an operator commits to for every stage of a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphTxids {
    /// The transaction that funds the kickoff.
    pub pre_kickoff: Txid,

    /// The transaction that starts a withdrawal.
    pub kickoff: Txid,

    /// The happy-path claim.
    pub take1: Txid,

    /// The transaction that starts the assertion chain after a challenge.
    pub assert_init: Txid,

    /// The transactions that commit to the intermediate assertions.
    pub assert_commits: Vec<Txid>,

    /// The transaction that finalizes the assertion; a dispute spends it.
    pub assert_final: Txid,

    /// The unhappy-path claim.
    pub take2: Txid,
}

/// The data an operator negotiates off-chain and the relayer posts for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorData {
    /// The id of the peg-in transaction this graph services.
    pub pegin_txid: Txid,

    /// The operator's source-chain key.
    pub operator_pubkey: XOnlyPublicKey,

    /// The operator's host-ledger account; it pays and receives the bond.
    pub operator_address: EvmAddress,

    /// The posted collateral.
    pub stake_amount: Amount,

    /// The committed stage transactions.
    pub txids: GraphTxids,
}

/// An operator's commitment to service a peg-in.
///
/// Immutable once posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRecord {
    /// The peg-in this graph services.
    pub instance_id: InstanceId,

    /// The data posted for the operator.
    pub data: OperatorData,
}

/// A withdrawal attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRecord {
    /// The peg-in being withdrawn.
    pub instance_id: InstanceId,

    /// The graph of the operator making the attempt.
    pub graph_id: GraphId,

    /// The current status.
    pub status: WithdrawStatus,

    /// The account that paid the bond.
    pub operator_address: EvmAddress,

    /// The bond in ledger units.
    pub bond: U256,
}

/// All the tables of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    pub(crate) pegins: BTreeMap<InstanceId, PeginRecord>,

    pub(crate) operators: BTreeMap<GraphId, OperatorRecord>,

    /// Keyed by the graph, so a canceled attempt is overwritten by the next one on the same
    /// slot.
    pub(crate) withdrawals: BTreeMap<GraphId, WithdrawRecord>,

    pub(crate) used_txids: BTreeSet<Txid>,

    /// Graphs whose kickoff was accepted. Never cleared.
    pub(crate) consumed_graphs: BTreeSet<GraphId>,
}

impl RegistryState {
    /// Creates an empty registry state.
    pub fn new() -> Self {
        Self::default()
    }
}

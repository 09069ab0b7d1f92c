//! Testing utilities specific to the registry.
//!
//! The [`Harness`] drives a registry over in-memory collaborators and confirms transactions by
//! attesting a fresh block that contains them.

mod pegin;
mod snapshot;

use bitcoin::{secp256k1::XOnlyPublicKey, Amount, OutPoint, Transaction, Txid};
use bitvm_bridge_params::bridge::BridgeParams;
use bitvm_bridge_primitives::{
    types::{BitcoinBlockHeight, EvmAddress, GraphId, InstanceId},
    units::BridgeUnitConverter,
};
use bitvm_bridge_proof_primitives::{RawTransaction, TxInclusionProof};
use bitvm_bridge_test_utils::{
    bitcoin::{
        generate_evm_address, generate_graph_id, generate_instance_id, generate_txid,
        generate_xonly_pubkey,
    },
    tx::{generate_dispute_tx, generate_pegin_tx, generate_tx},
};
use ethnum::U256;

use super::Registry;
use crate::{
    auth::CallContext,
    collaborators::{BondHook, TokenLedger},
    inmemory::{InMemorySpvOracle, InMemoryTokenLedger},
    state::{GraphTxids, OperatorData, OperatorRecord, WithdrawRecord},
};

// ===== Test Constants =====

/// The relayer of the registry under test.
pub(super) const RELAYER: EvmAddress = EvmAddress([0x11; 20]);
/// The escrow account of the registry under test.
pub(super) const ESCROW: EvmAddress = EvmAddress([0xee; 20]);
/// An account with no role.
pub(super) const STRANGER: EvmAddress = EvmAddress([0x5a; 20]);
/// The amount deposited by peg-ins in tests.
pub(super) const PEGIN_AMOUNT: Amount = Amount::from_sat(50_000_000);
/// The height of the first block attested in tests.
pub(super) const INITIAL_BLOCK_HEIGHT: BitcoinBlockHeight = 100;
/// Position of the confirmed transaction within the test blocks.
const CONFIRMED_POSITION: u32 = 2;
/// Number of transactions in the test blocks.
const BLOCK_SIZE: usize = 5;

const _: () = assert!((CONFIRMED_POSITION as usize) < BLOCK_SIZE);

/// The registry under test.
pub(super) type TestRegistry = Registry<InMemorySpvOracle, InMemoryTokenLedger, RecordingHook>;

/// A bond hook that records every callback.
#[derive(Debug, Default)]
pub(super) struct RecordingHook {
    pub(super) kickoffs: Vec<GraphId>,
    pub(super) completions: Vec<GraphId>,
    pub(super) disproofs: Vec<GraphId>,
}

impl BondHook for RecordingHook {
    fn on_kickoff(&mut self, withdrawal: &WithdrawRecord, _operator: &OperatorRecord) {
        self.kickoffs.push(withdrawal.graph_id);
    }

    fn on_complete(&mut self, withdrawal: &WithdrawRecord, _operator: &OperatorRecord) {
        self.completions.push(withdrawal.graph_id);
    }

    fn on_disproved(&mut self, withdrawal: &WithdrawRecord, _operator: &OperatorRecord) {
        self.disproofs.push(withdrawal.graph_id);
    }
}

/// A transaction confirmed in an attested block.
#[derive(Debug, Clone)]
pub(super) struct Confirmed {
    pub(super) tx: RawTransaction,
    pub(super) height: BitcoinBlockHeight,
    pub(super) proof: TxInclusionProof,
}

/// A posted peg-in.
#[derive(Debug, Clone)]
pub(super) struct PeginFixture {
    pub(super) instance_id: InstanceId,
    pub(super) txid: Txid,
    pub(super) destination: EvmAddress,
}

/// An operator graph together with the transactions it commits to.
#[derive(Debug, Clone)]
pub(super) struct GraphFixture {
    pub(super) graph_id: GraphId,
    pub(super) operator_address: EvmAddress,
    pub(super) operator_pubkey: XOnlyPublicKey,
    pub(super) data: OperatorData,
    pub(super) kickoff_tx: Transaction,
    pub(super) take1_tx: Transaction,
    pub(super) take2_tx: Transaction,
    pub(super) dispute_tx: Transaction,
}

impl GraphFixture {
    /// Generates a graph for the peg-in `pegin_txid` with collateral `stake_amount`.
    pub(super) fn new(pegin_txid: Txid, stake_amount: Amount) -> Self {
        let kickoff_tx = generate_tx(1, 2);
        let take1_tx = generate_tx(2, 1);
        let take2_tx = generate_tx(3, 1);
        let assert_final = generate_txid();
        let dispute_tx = generate_dispute_tx(OutPoint::new(assert_final, 0));

        let operator_address = generate_evm_address();
        let operator_pubkey = generate_xonly_pubkey();

        let data = OperatorData {
            pegin_txid,
            operator_pubkey,
            operator_address,
            stake_amount,
            txids: GraphTxids {
                pre_kickoff: generate_txid(),
                kickoff: kickoff_tx.compute_txid(),
                take1: take1_tx.compute_txid(),
                assert_init: generate_txid(),
                assert_commits: (0..3).map(|_| generate_txid()).collect(),
                assert_final,
                take2: take2_tx.compute_txid(),
            },
        };

        Self {
            graph_id: generate_graph_id(),
            operator_address,
            operator_pubkey,
            data,
            kickoff_tx,
            take1_tx,
            take2_tx,
            dispute_tx,
        }
    }

    /// The context of the operator owning this graph.
    pub(super) const fn ctx(&self) -> CallContext {
        CallContext::new(self.operator_address)
    }
}

/// Drives a registry over in-memory collaborators.
#[derive(Debug)]
pub(super) struct Harness {
    pub(super) registry: TestRegistry,
    next_height: BitcoinBlockHeight,
}

impl Harness {
    pub(super) fn new() -> Self {
        Self::with_params(BridgeParams::new(RELAYER, ESCROW))
    }

    pub(super) fn with_params(params: BridgeParams) -> Self {
        let registry = Registry::new(params, InMemorySpvOracle::new(), InMemoryTokenLedger::new())
            .expect("params must be valid")
            .with_bond_hook(RecordingHook::default());

        Self {
            registry,
            next_height: INITIAL_BLOCK_HEIGHT,
        }
    }

    /// The context of the relayer.
    pub(super) const fn relayer() -> CallContext {
        CallContext::new(RELAYER)
    }

    /// Attests a new block containing `tx` and returns the proof of its inclusion.
    pub(super) fn confirm(&mut self, tx: &Transaction) -> Confirmed {
        let mut txids: Vec<Txid> = (0..BLOCK_SIZE).map(|_| generate_txid()).collect();
        txids[CONFIRMED_POSITION as usize] = tx.compute_txid();

        let (proof, root) =
            TxInclusionProof::generate(&txids, CONFIRMED_POSITION).expect("position is in range");

        let height = self.next_height;
        self.next_height += 1;
        self.registry.oracle_mut().insert(height, root);

        Confirmed {
            tx: RawTransaction::from(tx),
            height,
            proof,
        }
    }

    /// Posts a confirmed peg-in of [`PEGIN_AMOUNT`].
    pub(super) fn post_pegin(&mut self) -> PeginFixture {
        let destination = generate_evm_address();
        let tx = generate_pegin_tx(PEGIN_AMOUNT, destination);
        let confirmed = self.confirm(&tx);
        let instance_id = generate_instance_id();

        self.registry
            .post_pegin(
                &Self::relayer(),
                instance_id,
                &confirmed.tx,
                confirmed.height,
                &confirmed.proof,
            )
            .expect("must post pegin");

        PeginFixture {
            instance_id,
            txid: tx.compute_txid(),
            destination,
        }
    }

    /// Posts a graph with the minimum stake for `pegin`.
    pub(super) fn post_graph(&mut self, pegin: &PeginFixture) -> GraphFixture {
        let graph = GraphFixture::new(pegin.txid, self.registry.policy().min_stake());

        self.registry
            .post_operator(
                &Self::relayer(),
                pegin.instance_id,
                graph.graph_id,
                graph.data.clone(),
            )
            .expect("must post operator");

        graph
    }

    /// Mints the bond for a withdrawal to the graph's operator and approves the escrow for it.
    pub(super) fn fund_operator(&mut self, graph: &GraphFixture) {
        let bond = bond();
        let escrow = self.registry.params().escrow;
        let ledger = self.registry.ledger_mut();

        ledger
            .mint(graph.operator_address, bond)
            .expect("must mint bond");
        ledger.approve(graph.operator_address, escrow, bond);
    }

    /// Posts a peg-in with a funded graph and starts a withdrawal through it.
    pub(super) fn initialized(&mut self) -> (PeginFixture, GraphFixture) {
        let pegin = self.post_pegin();
        let graph = self.post_graph(&pegin);
        self.fund_operator(&graph);

        self.registry
            .init_withdraw(&graph.ctx(), pegin.instance_id, graph.graph_id)
            .expect("must init withdrawal");

        (pegin, graph)
    }

    /// Like [`Self::initialized`] and additionally accepts the kickoff.
    pub(super) fn processing(&mut self) -> (PeginFixture, GraphFixture) {
        let (pegin, graph) = self.initialized();
        let kickoff = self.confirm(&graph.kickoff_tx);

        self.registry
            .proceed_withdraw(
                &graph.ctx(),
                graph.graph_id,
                &kickoff.tx,
                kickoff.height,
                &kickoff.proof,
            )
            .expect("must proceed withdrawal");

        (pegin, graph)
    }
}

/// The bond required for a peg-in of [`PEGIN_AMOUNT`].
pub(super) fn bond() -> U256 {
    BridgeUnitConverter::to_ledger_units(PEGIN_AMOUNT).expect("must convert")
}

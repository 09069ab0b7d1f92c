//! The lifecycle of withdrawal attempts.

use bitcoin::Txid;
use bitvm_bridge_primitives::{
    types::{BitcoinBlockHeight, GraphId, InstanceId},
    units::BridgeUnitConverter,
};
use bitvm_bridge_proof_primitives::{
    tx_parser::{parse_dispute, parse_kickoff, parse_take1, parse_take2},
    RawTransaction, TxInclusionProof,
};
use tracing::{info, warn};

use super::Registry;
use crate::{
    auth::CallContext,
    collaborators::{BondHook, SpvOracle, TokenLedger},
    errors::{RegistryError, RegistryResult},
    events::{ClaimPath, RegistryEvent},
    state::{OperatorRecord, PeginStatus, WithdrawRecord, WithdrawStatus},
};

impl<O, L, H> Registry<O, L, H>
where
    O: SpvOracle,
    L: TokenLedger,
    H: BondHook,
{
    /// Starts a withdrawal of `instance_id` through the graph `graph_id`.
    ///
    /// Locks the peg-in and moves the bond, the peg-in amount in ledger units, from the caller
    /// into the escrow account. The caller must have approved the escrow account to spend the bond
    /// beforehand.
    ///
    /// Only the operator that owns the graph may start a withdrawal through it. Of several
    /// operators racing for the same peg-in only the first succeeds; the others observe a locked
    /// peg-in.
    pub fn init_withdraw(
        &mut self,
        ctx: &CallContext,
        instance_id: InstanceId,
        graph_id: GraphId,
    ) -> RegistryResult<WithdrawRecord> {
        self.try_init_withdraw(ctx, instance_id, graph_id)
            .inspect_err(|err| {
                warn!(
                    %instance_id,
                    %graph_id,
                    caller = %ctx.caller(),
                    %err,
                    "rejected withdrawal"
                )
            })
    }

    /// Withdraws an attempt before its kickoff.
    ///
    /// Returns the bond to the operator that paid it and reopens the peg-in. The same graph may
    /// start a new attempt afterwards.
    ///
    /// The relayer or the operator that owns the attempt may cancel it.
    pub fn cancel_withdraw(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
    ) -> RegistryResult<WithdrawRecord> {
        self.try_cancel_withdraw(ctx, graph_id)
            .inspect_err(|err| {
                warn!(%graph_id, caller = %ctx.caller(), %err, "rejected cancellation")
            })
    }

    /// Accepts the kickoff of an attempt.
    ///
    /// The kickoff must be the one committed in the operator's graph. Once a kickoff is accepted
    /// the graph can never start another attempt, even if this one is later disproved.
    ///
    /// The relayer or the operator that owns the attempt may submit the kickoff.
    pub fn proceed_withdraw(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<WithdrawRecord> {
        self.try_proceed_withdraw(ctx, graph_id, tx, height, proof)
            .inspect_err(|err| warn!(%graph_id, %err, "rejected kickoff"))
    }

    /// Settles an attempt through the happy path.
    ///
    /// The transaction must be the committed take1. Claims the peg-in.
    pub fn finish_happy_path(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<WithdrawRecord> {
        self.try_finish_claim(ctx, graph_id, tx, height, proof, ClaimPath::Happy)
            .inspect_err(|err| warn!(%graph_id, %err, "rejected happy path"))
    }

    /// Settles an attempt through the unhappy path.
    ///
    /// The transaction must be the committed take2. Claims the peg-in.
    pub fn finish_unhappy_path(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<WithdrawRecord> {
        self.try_finish_claim(ctx, graph_id, tx, height, proof, ClaimPath::Unhappy)
            .inspect_err(|err| warn!(%graph_id, %err, "rejected unhappy path"))
    }

    /// Settles an attempt whose assertion was disproved.
    ///
    /// The transaction must be a dispute spending the committed finalization transaction.
    /// Reopens the peg-in for another attempt.
    pub fn finish_disproved(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<WithdrawRecord> {
        self.try_finish_disproved(ctx, graph_id, tx, height, proof)
            .inspect_err(|err| warn!(%graph_id, %err, "rejected disproof"))
    }

    fn try_init_withdraw(
        &mut self,
        ctx: &CallContext,
        instance_id: InstanceId,
        graph_id: GraphId,
    ) -> RegistryResult<WithdrawRecord> {
        let operator = self.operator_record(&graph_id)?;
        ctx.require_operator(operator.data.operator_address)?;

        if operator.instance_id != instance_id {
            return Err(RegistryError::mismatch(
                "graph pegin",
                operator.instance_id,
                instance_id,
            ));
        }

        let pegin = self.pegin_record(&instance_id)?;
        if pegin.status != PeginStatus::Withdrawable {
            return Err(RegistryError::state(format!(
                "pegin {instance_id} is {}",
                pegin.status
            )));
        }

        if self.state.consumed_graphs.contains(&graph_id) {
            return Err(RegistryError::state(format!(
                "graph {graph_id} has already been kicked off"
            )));
        }

        if let Some(previous) = self.state.withdrawals.get(&graph_id) {
            if previous.status != WithdrawStatus::Canceled {
                return Err(RegistryError::state(format!(
                    "graph {graph_id} has a withdrawal in status {}",
                    previous.status
                )));
            }
        }

        let bond = BridgeUnitConverter::to_ledger_units(pegin.amount)?;
        let escrow = self.params.escrow;
        self.ledger
            .transfer_from(escrow, ctx.caller(), escrow, bond)?;

        let withdrawal = WithdrawRecord {
            instance_id,
            graph_id,
            status: WithdrawStatus::Initialized,
            operator_address: ctx.caller(),
            bond,
        };

        self.set_pegin_status(&instance_id, PeginStatus::Locked);
        self.state.withdrawals.insert(graph_id, withdrawal.clone());
        self.events.push(RegistryEvent::WithdrawInitialized {
            instance_id,
            graph_id,
            bond,
        });

        info!(
            %instance_id,
            %graph_id,
            operator = %ctx.caller(),
            %bond,
            "withdrawal initialized"
        );

        Ok(withdrawal)
    }

    fn try_cancel_withdraw(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
    ) -> RegistryResult<WithdrawRecord> {
        let withdrawal = self.withdraw_record(&graph_id)?;
        ctx.require_relayer_or_operator(self.params.relayer, withdrawal.operator_address)?;
        expect_status(withdrawal, WithdrawStatus::Initialized)?;

        let mut withdrawal = withdrawal.clone();
        self.ledger.transfer(
            self.params.escrow,
            withdrawal.operator_address,
            withdrawal.bond,
        )?;

        withdrawal.status = WithdrawStatus::Canceled;

        self.set_pegin_status(&withdrawal.instance_id, PeginStatus::Withdrawable);
        self.state.withdrawals.insert(graph_id, withdrawal.clone());
        self.events.push(RegistryEvent::WithdrawCanceled {
            instance_id: withdrawal.instance_id,
            graph_id,
        });

        info!(
            instance_id = %withdrawal.instance_id,
            %graph_id,
            by = %ctx.caller(),
            "withdrawal canceled"
        );

        Ok(withdrawal)
    }

    fn try_proceed_withdraw(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<WithdrawRecord> {
        let (mut withdrawal, operator) =
            self.attempt_in(ctx, &graph_id, WithdrawStatus::Initialized)?;

        let kickoff_txid = parse_kickoff(tx)?;
        self.verify_inclusion(kickoff_txid, height, proof)?;
        expect_txid("kickoff txid", operator.data.txids.kickoff, kickoff_txid)?;

        withdrawal.status = WithdrawStatus::Processing;
        self.hook.on_kickoff(&withdrawal, &operator);

        self.state.consumed_graphs.insert(graph_id);
        self.state.withdrawals.insert(graph_id, withdrawal.clone());
        self.events.push(RegistryEvent::WithdrawProceeded {
            instance_id: withdrawal.instance_id,
            graph_id,
            kickoff_txid,
        });

        info!(
            instance_id = %withdrawal.instance_id,
            %graph_id,
            %kickoff_txid,
            "withdrawal proceeded"
        );

        Ok(withdrawal)
    }

    fn try_finish_claim(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
        path: ClaimPath,
    ) -> RegistryResult<WithdrawRecord> {
        let (mut withdrawal, operator) =
            self.attempt_in(ctx, &graph_id, WithdrawStatus::Processing)?;

        let (txid, committed) = match path {
            ClaimPath::Happy => (parse_take1(tx)?, operator.data.txids.take1),
            ClaimPath::Unhappy => (parse_take2(tx)?, operator.data.txids.take2),
        };
        self.verify_inclusion(txid, height, proof)?;

        let what = match path {
            ClaimPath::Happy => "take1 txid",
            ClaimPath::Unhappy => "take2 txid",
        };
        expect_txid(what, committed, txid)?;

        withdrawal.status = WithdrawStatus::Complete;
        self.hook.on_complete(&withdrawal, &operator);

        self.set_pegin_status(&withdrawal.instance_id, PeginStatus::Claimed);
        self.state.withdrawals.insert(graph_id, withdrawal.clone());
        self.events.push(RegistryEvent::WithdrawCompleted {
            instance_id: withdrawal.instance_id,
            graph_id,
            path,
        });

        info!(
            instance_id = %withdrawal.instance_id,
            %graph_id,
            ?path,
            %txid,
            "withdrawal completed"
        );

        Ok(withdrawal)
    }

    fn try_finish_disproved(
        &mut self,
        ctx: &CallContext,
        graph_id: GraphId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<WithdrawRecord> {
        let (mut withdrawal, operator) =
            self.attempt_in(ctx, &graph_id, WithdrawStatus::Processing)?;

        let dispute = parse_dispute(tx)?;
        self.verify_inclusion(dispute.txid, height, proof)?;
        expect_txid(
            "finalization txid",
            operator.data.txids.assert_final,
            dispute.finalization_txid,
        )?;

        withdrawal.status = WithdrawStatus::Disproved;
        self.hook.on_disproved(&withdrawal, &operator);

        self.set_pegin_status(&withdrawal.instance_id, PeginStatus::Withdrawable);
        self.state.withdrawals.insert(graph_id, withdrawal.clone());
        self.events.push(RegistryEvent::WithdrawDisproved {
            instance_id: withdrawal.instance_id,
            graph_id,
            dispute_txid: dispute.txid,
        });

        info!(
            instance_id = %withdrawal.instance_id,
            %graph_id,
            dispute_txid = %dispute.txid,
            "withdrawal disproved"
        );

        Ok(withdrawal)
    }

    /// Loads the attempt on `graph_id` and its graph after authorizing the caller and checking
    /// that the attempt is in `expected`.
    fn attempt_in(
        &self,
        ctx: &CallContext,
        graph_id: &GraphId,
        expected: WithdrawStatus,
    ) -> RegistryResult<(WithdrawRecord, OperatorRecord)> {
        let withdrawal = self.withdraw_record(graph_id)?;
        ctx.require_relayer_or_operator(self.params.relayer, withdrawal.operator_address)?;
        expect_status(withdrawal, expected)?;

        let operator = self.operator_record(graph_id)?;

        Ok((withdrawal.clone(), operator.clone()))
    }

    fn set_pegin_status(&mut self, instance_id: &InstanceId, status: PeginStatus) {
        if let Some(pegin) = self.state.pegins.get_mut(instance_id) {
            pegin.status = status;
        }
    }
}

fn expect_status(withdrawal: &WithdrawRecord, expected: WithdrawStatus) -> RegistryResult<()> {
    if withdrawal.status != expected {
        return Err(RegistryError::state(format!(
            "withdrawal for graph {} is {}, expected {expected}",
            withdrawal.graph_id, withdrawal.status
        )));
    }

    Ok(())
}

fn expect_txid(what: &'static str, committed: Txid, found: Txid) -> RegistryResult<()> {
    if committed != found {
        return Err(RegistryError::mismatch(what, committed, found));
    }

    Ok(())
}

//! Posting of deposits.

use std::collections::BTreeSet;

use bitvm_bridge_primitives::{
    types::{BitcoinBlockHeight, InstanceId},
    units::BridgeUnitConverter,
};
use bitvm_bridge_proof_primitives::{tx_parser::parse_pegin, RawTransaction, TxInclusionProof};
use tracing::{info, warn};

use super::Registry;
use crate::{
    auth::CallContext,
    collaborators::{BondHook, SpvOracle, TokenLedger},
    errors::{RegistryError, RegistryResult},
    events::RegistryEvent,
    state::{PeginRecord, PeginStatus},
};

impl<O, L, H> Registry<O, L, H>
where
    O: SpvOracle,
    L: TokenLedger,
    H: BondHook,
{
    /// Accepts a deposit proven to be included in the block attested at `height`.
    ///
    /// The peg-in transaction id is consumed and can never back another peg-in. The destination
    /// embedded in the transaction is credited with the deposited amount in ledger units.
    ///
    /// Only the relayer may post peg-ins.
    pub fn post_pegin(
        &mut self,
        ctx: &CallContext,
        instance_id: InstanceId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<PeginRecord> {
        self.try_post_pegin(ctx, instance_id, tx, height, proof)
            .inspect_err(|err| {
                warn!(%instance_id, caller = %ctx.caller(), %err, "rejected pegin")
            })
    }

    fn try_post_pegin(
        &mut self,
        ctx: &CallContext,
        instance_id: InstanceId,
        tx: &RawTransaction,
        height: BitcoinBlockHeight,
        proof: &TxInclusionProof,
    ) -> RegistryResult<PeginRecord> {
        ctx.require_relayer(self.params.relayer)?;

        if self.state.pegins.contains_key(&instance_id) {
            return Err(RegistryError::state(format!(
                "pegin {instance_id} already exists"
            )));
        }

        let pegin = parse_pegin(tx)?;

        if self.state.used_txids.contains(&pegin.txid) {
            return Err(RegistryError::Replay(pegin.txid));
        }

        self.verify_inclusion(pegin.txid, height, proof)?;

        let credit = BridgeUnitConverter::to_ledger_units(pegin.amount)?;
        self.ledger.mint(pegin.destination, credit)?;

        let record = PeginRecord {
            txid: pegin.txid,
            height,
            amount: pegin.amount,
            destination: pegin.destination,
            status: PeginStatus::Withdrawable,
            graph_ids: BTreeSet::new(),
        };

        self.state.used_txids.insert(pegin.txid);
        self.state.pegins.insert(instance_id, record.clone());
        self.events.push(RegistryEvent::PeginPosted {
            instance_id,
            txid: pegin.txid,
            amount: pegin.amount,
            destination: pegin.destination,
        });

        info!(
            %instance_id,
            txid = %pegin.txid,
            amount = %pegin.amount,
            destination = %pegin.destination,
            %credit,
            "pegin posted"
        );

        Ok(record)
    }
}

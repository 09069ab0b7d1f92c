//! Posting of operator graphs.

use std::collections::BTreeSet;

use bitvm_bridge_primitives::types::{GraphId, InstanceId};
use tracing::{info, warn};

use super::Registry;
use crate::{
    auth::CallContext,
    collaborators::{BondHook, SpvOracle, TokenLedger},
    errors::{RegistryError, RegistryResult},
    events::RegistryEvent,
    state::{OperatorData, OperatorRecord, PeginStatus},
};

impl<O, L, H> Registry<O, L, H>
where
    O: SpvOracle,
    L: TokenLedger,
    H: BondHook,
{
    /// Attaches an operator graph to a peg-in.
    ///
    /// The graph must reference the peg-in transaction of `instance_id` and its collateral must
    /// satisfy the stake policy. Graphs cannot be updated once posted.
    ///
    /// Only the relayer may post operator graphs.
    pub fn post_operator(
        &mut self,
        ctx: &CallContext,
        instance_id: InstanceId,
        graph_id: GraphId,
        data: OperatorData,
    ) -> RegistryResult<OperatorRecord> {
        self.try_post_operator(ctx, instance_id, graph_id, data)
            .inspect_err(|err| warn!(%instance_id, %graph_id, %err, "rejected operator"))
    }

    /// Attaches several operator graphs at once.
    ///
    /// Either every graph is attached or none is: the first failing item aborts the batch. A
    /// graph id that appears twice in the batch is rejected like one that was posted before.
    pub fn post_operators(
        &mut self,
        ctx: &CallContext,
        graphs: Vec<(InstanceId, GraphId, OperatorData)>,
    ) -> RegistryResult<Vec<OperatorRecord>> {
        self.try_post_operators(ctx, graphs)
            .inspect_err(|err| warn!(%err, "rejected operator batch"))
    }

    fn try_post_operator(
        &mut self,
        ctx: &CallContext,
        instance_id: InstanceId,
        graph_id: GraphId,
        data: OperatorData,
    ) -> RegistryResult<OperatorRecord> {
        ctx.require_relayer(self.params.relayer)?;
        self.check_operator(&instance_id, &graph_id, &data)?;

        Ok(self.apply_operator(instance_id, graph_id, data))
    }

    fn try_post_operators(
        &mut self,
        ctx: &CallContext,
        graphs: Vec<(InstanceId, GraphId, OperatorData)>,
    ) -> RegistryResult<Vec<OperatorRecord>> {
        ctx.require_relayer(self.params.relayer)?;

        let mut batch = BTreeSet::new();
        for (instance_id, graph_id, data) in &graphs {
            if !batch.insert(*graph_id) {
                return Err(RegistryError::state(format!(
                    "graph {graph_id} appears twice in the batch"
                )));
            }

            self.check_operator(instance_id, graph_id, data)?;
        }

        Ok(graphs
            .into_iter()
            .map(|(instance_id, graph_id, data)| self.apply_operator(instance_id, graph_id, data))
            .collect())
    }

    fn check_operator(
        &self,
        instance_id: &InstanceId,
        graph_id: &GraphId,
        data: &OperatorData,
    ) -> RegistryResult<()> {
        if self.state.operators.contains_key(graph_id) {
            return Err(RegistryError::state(format!(
                "graph {graph_id} already exists"
            )));
        }

        let pegin = self.pegin_record(instance_id)?;
        if pegin.status == PeginStatus::Claimed {
            return Err(RegistryError::state(format!(
                "pegin {instance_id} is {}",
                pegin.status
            )));
        }

        if data.pegin_txid != pegin.txid {
            return Err(RegistryError::mismatch(
                "pegin txid",
                pegin.txid,
                data.pegin_txid,
            ));
        }

        if !self.policy.is_valid_stake(data.stake_amount) {
            return Err(RegistryError::Policy {
                stake: data.stake_amount,
                minimum: self.policy.min_stake(),
            });
        }

        Ok(())
    }

    /// Must only be called after [`Self::check_operator`] succeeded for the same arguments.
    fn apply_operator(
        &mut self,
        instance_id: InstanceId,
        graph_id: GraphId,
        data: OperatorData,
    ) -> OperatorRecord {
        if let Some(pegin) = self.state.pegins.get_mut(&instance_id) {
            pegin.graph_ids.insert(graph_id);
        }

        let record = OperatorRecord { instance_id, data };
        self.state.operators.insert(graph_id, record.clone());
        self.events.push(RegistryEvent::OperatorPosted {
            instance_id,
            graph_id,
        });

        info!(
            %instance_id,
            %graph_id,
            operator = %record.data.operator_pubkey,
            stake = %record.data.stake_amount,
            "operator posted"
        );

        record
    }
}

//! Unit tests for restoring a registry from a snapshot
#[cfg(test)]
mod tests {
    use bitvm_bridge_params::{bridge::BridgeParams, errors::ParamsError};

    use crate::{
        errors::RegistryError,
        inmemory::{InMemorySpvOracle, InMemoryTokenLedger},
        registry::{tests::*, Registry},
        state::{PeginStatus, RegistryState, WithdrawStatus},
    };

    #[test]
    fn test_snapshot_round_trip() {
        let mut harness = Harness::new();
        let (pegin, graph) = harness.processing();
        let idle = harness.post_pegin();

        let json = serde_json::to_string(harness.registry.state()).expect("must serialize");
        let state: RegistryState = serde_json::from_str(&json).expect("must deserialize");
        assert_eq!(&state, harness.registry.state());

        let restored = Registry::from_state(
            BridgeParams::new(RELAYER, ESCROW),
            state,
            harness.registry.oracle().clone(),
            harness.registry.ledger().clone(),
        )
        .expect("params are valid");

        assert_eq!(
            restored.pegin(&pegin.instance_id).unwrap().status,
            PeginStatus::Locked
        );
        assert_eq!(
            restored.withdrawal(&graph.graph_id).unwrap().status,
            WithdrawStatus::Processing
        );
        assert_eq!(restored.withdrawable_instances(), vec![idle.instance_id]);
        assert!(restored.is_txid_used(&pegin.txid));
        assert_eq!(restored.escrow_balance(), bond());
    }

    /// A restored registry still refuses replays and burned slots.
    #[test]
    fn test_restored_registry_keeps_guards() {
        let mut harness = Harness::new();
        let (pegin, graph) = harness.processing();
        let dispute = harness.confirm(&graph.dispute_tx);
        harness
            .registry
            .finish_disproved(
                &Harness::relayer(),
                graph.graph_id,
                &dispute.tx,
                dispute.height,
                &dispute.proof,
            )
            .expect("must disprove");

        let mut restored = Registry::from_state(
            BridgeParams::new(RELAYER, ESCROW),
            harness.registry.state().clone(),
            InMemorySpvOracle::new(),
            InMemoryTokenLedger::new(),
        )
        .expect("params are valid");

        let result = restored.init_withdraw(&graph.ctx(), pegin.instance_id, graph.graph_id);
        assert!(matches!(result, Err(RegistryError::State(_))));
        assert!(restored.drain_events().is_empty());
    }

    #[test]
    fn test_restore_rejects_invalid_params() {
        let harness = Harness::new();

        let result = Registry::from_state(
            BridgeParams::new(RELAYER, RELAYER),
            harness.registry.state().clone(),
            InMemorySpvOracle::new(),
            InMemoryTokenLedger::new(),
        );

        assert!(matches!(
            result,
            Err(RegistryError::Params(ParamsError::EscrowIsRelayer))
        ));
    }
}

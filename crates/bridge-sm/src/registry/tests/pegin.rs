//! Unit tests for post_pegin
#[cfg(test)]
mod tests {
    use bitcoin::{Amount, ScriptBuf};
    use bitvm_bridge_primitives::{buf::Buf32, units::BridgeUnitConverter};
    use bitvm_bridge_proof_primitives::{errors::ParseError, RawTransaction, TxInclusionProof};
    use bitvm_bridge_test_utils::{
        bitcoin::{generate_evm_address, generate_instance_id},
        tx::generate_pegin_tx,
    };
    use ethnum::U256;

    use crate::{
        auth::{CallContext, Role},
        errors::{OracleError, RegistryError},
        events::RegistryEvent,
        registry::tests::*,
        state::PeginStatus,
    };

    #[test]
    fn test_post_pegin_credits_destination() {
        let mut harness = Harness::new();
        let destination = generate_evm_address();
        let tx = generate_pegin_tx(PEGIN_AMOUNT, destination);
        let confirmed = harness.confirm(&tx);
        let instance_id = generate_instance_id();

        let record = harness
            .registry
            .post_pegin(
                &Harness::relayer(),
                instance_id,
                &confirmed.tx,
                confirmed.height,
                &confirmed.proof,
            )
            .expect("must post pegin");

        assert_eq!(record.txid, tx.compute_txid());
        assert_eq!(record.amount, PEGIN_AMOUNT);
        assert_eq!(record.destination, destination);
        assert_eq!(record.status, PeginStatus::Withdrawable);
        assert_eq!(harness.registry.pegin(&instance_id), Some(&record));
        assert!(harness.registry.is_txid_used(&record.txid));

        assert_eq!(
            harness.registry.ledger().balance_of(&destination),
            BridgeUnitConverter::to_ledger_units(PEGIN_AMOUNT).unwrap()
        );
        assert_eq!(
            harness.registry.drain_events(),
            vec![RegistryEvent::PeginPosted {
                instance_id,
                txid: record.txid,
                amount: PEGIN_AMOUNT,
                destination,
            }]
        );
    }

    #[test]
    fn test_post_pegin_requires_relayer() {
        let mut harness = Harness::new();
        let tx = generate_pegin_tx(PEGIN_AMOUNT, generate_evm_address());
        let confirmed = harness.confirm(&tx);

        let result = harness.registry.post_pegin(
            &CallContext::new(STRANGER),
            generate_instance_id(),
            &confirmed.tx,
            confirmed.height,
            &confirmed.proof,
        );

        assert_eq!(
            result,
            Err(RegistryError::Authorization {
                caller: STRANGER,
                required: Role::Relayer
            })
        );
        assert!(harness.registry.instance_ids().is_empty());
    }

    /// A peg-in id can back a single record, even when presented with a different valid proof.
    #[test]
    fn test_post_pegin_replay() {
        let mut harness = Harness::new();
        let tx = generate_pegin_tx(PEGIN_AMOUNT, generate_evm_address());

        let first = harness.confirm(&tx);
        harness
            .registry
            .post_pegin(
                &Harness::relayer(),
                generate_instance_id(),
                &first.tx,
                first.height,
                &first.proof,
            )
            .expect("must post pegin");

        let second = harness.confirm(&tx);
        let supply = harness.registry.ledger().total_supply();

        let result = harness.registry.post_pegin(
            &Harness::relayer(),
            generate_instance_id(),
            &second.tx,
            second.height,
            &second.proof,
        );

        assert_eq!(result, Err(RegistryError::Replay(tx.compute_txid())));
        assert_eq!(harness.registry.instance_ids().len(), 1);
        assert_eq!(harness.registry.ledger().total_supply(), supply);
    }

    #[test]
    fn test_post_pegin_duplicate_instance_id() {
        let mut harness = Harness::new();
        let pegin = harness.post_pegin();

        let tx = generate_pegin_tx(PEGIN_AMOUNT, generate_evm_address());
        let confirmed = harness.confirm(&tx);

        let result = harness.registry.post_pegin(
            &Harness::relayer(),
            pegin.instance_id,
            &confirmed.tx,
            confirmed.height,
            &confirmed.proof,
        );

        assert!(matches!(result, Err(RegistryError::State(_))));
        assert!(!harness.registry.is_txid_used(&tx.compute_txid()));
    }

    #[test]
    fn test_post_pegin_bad_proof() {
        let mut harness = Harness::new();
        let tx = generate_pegin_tx(PEGIN_AMOUNT, generate_evm_address());
        let confirmed = harness.confirm(&tx);

        let mut cohashes = confirmed.proof.cohashes().to_vec();
        cohashes[0] = Buf32([0xff; 32]);
        let forged = TxInclusionProof::new(confirmed.proof.position(), cohashes);

        let result = harness.registry.post_pegin(
            &Harness::relayer(),
            generate_instance_id(),
            &confirmed.tx,
            confirmed.height,
            &forged,
        );

        assert_eq!(
            result,
            Err(RegistryError::MerkleProof {
                txid: tx.compute_txid(),
                height: confirmed.height
            })
        );
        assert!(!harness.registry.is_txid_used(&tx.compute_txid()));
        assert_eq!(harness.registry.ledger().total_supply(), U256::ZERO);
    }

    #[test]
    fn test_post_pegin_unknown_height() {
        let mut harness = Harness::new();
        let tx = generate_pegin_tx(PEGIN_AMOUNT, generate_evm_address());
        let confirmed = harness.confirm(&tx);

        let result = harness.registry.post_pegin(
            &Harness::relayer(),
            generate_instance_id(),
            &confirmed.tx,
            confirmed.height + 1,
            &confirmed.proof,
        );

        assert_eq!(
            result,
            Err(RegistryError::Oracle(OracleError::UnknownHeight(
                confirmed.height + 1
            )))
        );
    }

    #[test]
    fn test_post_pegin_invalid_data_carrier() {
        let mut harness = Harness::new();
        let mut tx = generate_pegin_tx(Amount::from_sat(1_000), generate_evm_address());
        tx.output[1].script_pubkey = ScriptBuf::new();
        let confirmed = harness.confirm(&tx);

        let result = harness.registry.post_pegin(
            &Harness::relayer(),
            generate_instance_id(),
            &confirmed.tx,
            confirmed.height,
            &confirmed.proof,
        );

        assert_eq!(
            result,
            Err(RegistryError::Parse(ParseError::InvalidDataCarrierScript))
        );
    }

    #[test]
    fn test_post_pegin_truncated_tx() {
        let mut harness = Harness::new();
        let tx = generate_pegin_tx(PEGIN_AMOUNT, generate_evm_address());
        let confirmed = harness.confirm(&tx);

        let mut truncated: RawTransaction = confirmed.tx.clone();
        truncated.output_vector.truncate(10);

        let result = harness.registry.post_pegin(
            &Harness::relayer(),
            generate_instance_id(),
            &truncated,
            confirmed.height,
            &confirmed.proof,
        );

        assert!(matches!(result, Err(RegistryError::Parse(_))));
        assert!(harness.registry.drain_events().is_empty());
    }
}

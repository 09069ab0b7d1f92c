//! Extraction of bridge facts from the staged transactions of the peg-in/peg-out protocol.
//!
//! Every parser first checks that the transaction is structurally well-formed and then computes
//! its id. Role-specific parsers read the additional fields that the registry needs.

use bitcoin::{
    hashes::Hash,
    opcodes::all::{OP_PUSHBYTES_20, OP_RETURN},
    Amount, Txid,
};
use bitvm_bridge_primitives::types::EvmAddress;
use tracing::trace;

use crate::{
    cursor::ByteCursor,
    errors::{ParseError, ParseResult},
    raw_tx::RawTransaction,
};

/// Length of the data-carrier script that embeds the destination address:
/// `OP_RETURN OP_PUSHBYTES_20 <20-byte address>`.
pub const DATA_CARRIER_SCRIPT_LEN: usize = 2 + EvmAddress::LEN;

/// The facts extracted from a peg-in transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeginInfo {
    /// The id of the peg-in transaction.
    pub txid: Txid,

    /// The amount locked in the first output.
    pub amount: Amount,

    /// The host-ledger account to credit, taken from the data-carrier in the second output.
    pub destination: EvmAddress,
}

/// The facts extracted from a dispute transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisputeInfo {
    /// The id of the dispute transaction.
    pub txid: Txid,

    /// The id of the finalization transaction spent by the first input.
    pub finalization_txid: Txid,
}

/// Computes the id of a structurally valid transaction.
pub fn parse_txid(tx: &RawTransaction) -> ParseResult<Txid> {
    tx.validate()?;

    Ok(tx.compute_id())
}

/// Parses a peg-in transaction.
///
/// The first output carries the deposited amount. The second output must be a data-carrier whose
/// script is exactly `OP_RETURN OP_PUSHBYTES_20 <address>`; any other shape is rejected.
pub fn parse_pegin(tx: &RawTransaction) -> ParseResult<PeginInfo> {
    let txid = parse_txid(tx)?;

    let mut cursor = ByteCursor::new(&tx.output_vector);
    let num_outputs = cursor.read_compact_size()?;
    if num_outputs < 2 {
        return Err(ParseError::MissingOutput {
            expected: 2,
            found: num_outputs,
        });
    }

    let amount = Amount::from_sat(cursor.read_u64_le()?);
    cursor.read_var_bytes()?;

    cursor.read_u64_le()?;
    let script = cursor.read_var_bytes()?;
    let destination = parse_data_carrier(script)?;

    trace!(%txid, %amount, %destination, "parsed pegin transaction");

    Ok(PeginInfo {
        txid,
        amount,
        destination,
    })
}

/// Parses a kickoff transaction.
pub fn parse_kickoff(tx: &RawTransaction) -> ParseResult<Txid> {
    parse_txid(tx)
}

/// Parses the transaction that settles the happy path.
pub fn parse_take1(tx: &RawTransaction) -> ParseResult<Txid> {
    parse_txid(tx)
}

/// Parses the transaction that settles the unhappy path.
pub fn parse_take2(tx: &RawTransaction) -> ParseResult<Txid> {
    parse_txid(tx)
}

/// Parses a dispute transaction.
///
/// The first input of a dispute spends the finalization transaction being disputed, so the txid
/// referenced by that input identifies the disputed assertion.
pub fn parse_dispute(tx: &RawTransaction) -> ParseResult<DisputeInfo> {
    let txid = parse_txid(tx)?;

    let mut cursor = ByteCursor::new(&tx.input_vector);
    if cursor.read_compact_size()? == 0 {
        return Err(ParseError::MissingInput);
    }

    let finalization_txid = Txid::from_byte_array(cursor.read_array()?);

    trace!(%txid, %finalization_txid, "parsed dispute transaction");

    Ok(DisputeInfo {
        txid,
        finalization_txid,
    })
}

fn parse_data_carrier(script: &[u8]) -> ParseResult<EvmAddress> {
    if script.len() != DATA_CARRIER_SCRIPT_LEN
        || script[0] != OP_RETURN.to_u8()
        || script[1] != OP_PUSHBYTES_20.to_u8()
    {
        return Err(ParseError::InvalidDataCarrierScript);
    }

    let mut address = [0u8; EvmAddress::LEN];
    address.copy_from_slice(&script[2..]);

    Ok(EvmAddress(address))
}

#[cfg(test)]
mod tests {
    use bitcoin::{OutPoint, ScriptBuf, TxOut};
    use bitvm_bridge_test_utils::{
        bitcoin::{generate_evm_address, generate_txid},
        tx::{generate_dispute_tx, generate_pegin_tx, generate_tx},
    };

    use super::*;

    #[test]
    fn test_parse_pegin() {
        let destination = generate_evm_address();
        let amount = Amount::from_sat(50_000_000);
        let tx = generate_pegin_tx(amount, destination);

        let info = parse_pegin(&RawTransaction::from(&tx)).expect("must parse pegin");

        assert_eq!(info.txid, tx.compute_txid());
        assert_eq!(info.amount, amount);
        assert_eq!(info.destination, destination);
    }

    #[test]
    fn test_parse_pegin_with_change_output() {
        let destination = generate_evm_address();
        let mut tx = generate_pegin_tx(Amount::from_sat(1_000), destination);
        tx.output.push(TxOut {
            value: Amount::from_sat(42),
            script_pubkey: ScriptBuf::new(),
        });

        let info = parse_pegin(&RawTransaction::from(&tx)).expect("must parse pegin");
        assert_eq!(info.destination, destination);
    }

    #[test]
    fn test_parse_pegin_rejects_wrong_script_shapes() {
        let destination = generate_evm_address();
        let tx = generate_pegin_tx(Amount::from_sat(1_000), destination);
        let carrier = tx.output[1].script_pubkey.to_bytes();

        let mut oversized = carrier.clone();
        oversized.push(0x00);

        let mut wrong_opcode = carrier.clone();
        wrong_opcode[0] = 0x00;

        let mut wrong_push = carrier.clone();
        wrong_push[1] = 0x15;

        let truncated = carrier[..DATA_CARRIER_SCRIPT_LEN - 1].to_vec();

        for script in [oversized, wrong_opcode, wrong_push, truncated] {
            let mut tx = tx.clone();
            tx.output[1].script_pubkey = ScriptBuf::from_bytes(script);

            assert_eq!(
                parse_pegin(&RawTransaction::from(&tx)),
                Err(ParseError::InvalidDataCarrierScript)
            );
        }
    }

    #[test]
    fn test_parse_pegin_requires_two_outputs() {
        let tx = generate_tx(1, 1);

        assert_eq!(
            parse_pegin(&RawTransaction::from(&tx)),
            Err(ParseError::MissingOutput {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_parse_dispute() {
        let finalization_txid = generate_txid();
        let tx = generate_dispute_tx(OutPoint::new(finalization_txid, 0));

        let info = parse_dispute(&RawTransaction::from(&tx)).expect("must parse dispute");

        assert_eq!(info.txid, tx.compute_txid());
        assert_eq!(info.finalization_txid, finalization_txid);
    }

    #[test]
    fn test_parse_dispute_requires_an_input() {
        let mut raw = RawTransaction::from(generate_tx(1, 1));
        raw.input_vector = vec![0x00];

        assert_eq!(parse_dispute(&raw), Err(ParseError::MissingInput));
    }

    #[test]
    fn test_stage_parsers_return_the_id() {
        let tx = generate_tx(2, 3);
        let raw = RawTransaction::from(&tx);

        for parse in [parse_kickoff, parse_take1, parse_take2] {
            assert_eq!(parse(&raw).unwrap(), tx.compute_txid());
        }
    }

    #[test]
    fn test_short_buffers_fail_without_panicking() {
        let tx = generate_pegin_tx(Amount::from_sat(1_000), generate_evm_address());
        let raw = RawTransaction::from(&tx);

        for len in 0..raw.output_vector.len() {
            let mut truncated = raw.clone();
            truncated.output_vector.truncate(len);

            assert!(parse_pegin(&truncated).is_err());
        }

        for len in 0..raw.input_vector.len() {
            let mut truncated = raw.clone();
            truncated.input_vector.truncate(len);

            assert!(parse_dispute(&truncated).is_err());
        }
    }
}

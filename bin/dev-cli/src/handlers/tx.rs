use anyhow::{Context, Result};
use bitcoin::{consensus, Transaction};
use bitvm_bridge_proof_primitives::{
    tx_parser::{parse_dispute, parse_pegin, parse_txid},
    RawTransaction,
};
use serde_json::json;
use tracing::info;

use crate::cli::{ParseDisputeArgs, ParsePeginArgs, TxInput, TxidArgs};

pub(crate) fn handle_txid(args: TxidArgs) -> Result<()> {
    let tx = load_tx(&args.input)?;
    let txid = parse_txid(&tx)?;

    println!("{txid}");

    Ok(())
}

pub(crate) fn handle_parse_pegin(args: ParsePeginArgs) -> Result<()> {
    let tx = load_tx(&args.input)?;
    let pegin = parse_pegin(&tx)?;

    info!(txid = %pegin.txid, "decoded pegin");

    let output = json!({
        "txid": pegin.txid.to_string(),
        "amount_sats": pegin.amount.to_sat(),
        "destination": pegin.destination.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

pub(crate) fn handle_parse_dispute(args: ParseDisputeArgs) -> Result<()> {
    let tx = load_tx(&args.input)?;
    let dispute = parse_dispute(&tx)?;

    info!(txid = %dispute.txid, "decoded dispute");

    let output = json!({
        "txid": dispute.txid.to_string(),
        "finalization_txid": dispute.finalization_txid.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn load_tx(input: &TxInput) -> Result<RawTransaction> {
    match (&input.tx, &input.hex) {
        (Some(json), _) => {
            serde_json::from_str(json).context("failed to parse the transaction JSON")
        }
        (None, Some(encoded)) => {
            let bytes = hex::decode(encoded.trim()).context("invalid transaction hex")?;
            let tx: Transaction =
                consensus::deserialize(&bytes).context("invalid consensus encoding")?;

            Ok(RawTransaction::from(&tx))
        }
        (None, None) => anyhow::bail!("either --tx or --hex must be given"),
    }
}

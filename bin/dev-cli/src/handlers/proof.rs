use anyhow::Result;
use bitvm_bridge_proof_primitives::{compute_root, verify_merkle_proof};
use serde_json::json;

use crate::cli::VerifyInclusionArgs;

pub(crate) fn handle_verify_inclusion(args: VerifyInclusionArgs) -> Result<()> {
    let VerifyInclusionArgs {
        root,
        leaf,
        index,
        cohashes,
    } = args;

    let computed = compute_root(&cohashes, leaf, index);
    let included = verify_merkle_proof(root, &cohashes, leaf, index);

    let output = json!({
        "computed_root": computed.to_string(),
        "included": included,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

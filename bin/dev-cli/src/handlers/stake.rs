use anyhow::Result;
use bitcoin::Amount;
use bitvm_bridge_params::prelude::StakeParams;
use bitvm_bridge_sm::policy::StakePolicy;
use serde_json::json;
use tracing::warn;

use crate::{
    cli::{CheckStakeArgs, ParamsArgs},
    params,
};

pub(crate) fn handle_check_stake(args: CheckStakeArgs) -> Result<()> {
    let stake = match args.params {
        Some(path) => params::from_path(path)?.stake,
        None => StakeParams::default(),
    };

    let policy = StakePolicy::from(&stake);
    let amount = Amount::from_sat(args.amount);
    let valid = policy.is_valid_stake(amount);

    if !valid {
        warn!(%amount, minimum = %policy.min_stake(), "stake below minimum");
    }

    let output = json!({
        "amount_sats": amount.to_sat(),
        "minimum_sats": policy.min_stake().to_sat(),
        "valid": valid,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

pub(crate) fn handle_params(args: ParamsArgs) -> Result<()> {
    let params = params::from_path(args.params)?;

    print!("{}", toml::to_string_pretty(&params)?);

    Ok(())
}

use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use bitvm_bridge_params::prelude::BridgeParams;

pub(crate) fn from_path(path: impl AsRef<Path>) -> Result<BridgeParams, anyhow::Error> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read params file {}", path.display()))?;

    let params: BridgeParams = toml::from_str(&contents)
        .map_err(|e| anyhow!(format!("Failed to parse params file: {}", e)))?;
    params.validate()?;

    Ok(params)
}

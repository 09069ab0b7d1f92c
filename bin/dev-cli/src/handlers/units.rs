use anyhow::Result;
use bitcoin::Amount;
use bitvm_bridge_primitives::units::BridgeUnitConverter;

use crate::cli::ConvertArgs;

pub(crate) fn handle_convert(args: ConvertArgs) -> Result<()> {
    let direction = args.direction;

    if let Some(sats) = direction.to_ledger {
        let units = BridgeUnitConverter::to_ledger_units(Amount::from_sat(sats))?;
        println!("{units}");
    } else if let Some(units) = direction.to_source {
        let amount = BridgeUnitConverter::to_source_units(units)?;
        println!("{}", amount.to_sat());
    }

    Ok(())
}

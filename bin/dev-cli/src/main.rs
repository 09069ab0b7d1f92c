//! Developer CLI for the BitVM bridge core.

mod cli;
mod handlers;
mod params;

use anyhow::{Error, Result};
use bitvm_bridge_common::logging::{self, LoggerConfig};
use clap::Parser;

use crate::handlers::{proof, stake, tx, units};

fn main() -> Result<(), Error> {
    logging::init(LoggerConfig::with_base_name("dev-cli"));

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::Txid(args) => tx::handle_txid(args),
        cli::Commands::ParsePegin(args) => tx::handle_parse_pegin(args),
        cli::Commands::ParseDispute(args) => tx::handle_parse_dispute(args),
        cli::Commands::VerifyInclusion(args) => proof::handle_verify_inclusion(args),
        cli::Commands::Convert(args) => units::handle_convert(args),
        cli::Commands::CheckStake(args) => stake::handle_check_stake(args),
        cli::Commands::Params(args) => stake::handle_params(args),
    }
}

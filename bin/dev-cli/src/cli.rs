use std::path::PathBuf;

use bitvm_bridge_primitives::buf::Buf32;
use clap::{Args, Parser, Subcommand};
use ethnum::U256;

#[derive(Parser)]
#[command(
    name = "dev-cli",
    about = "BitVM bridge CLI for decoding and checking bridge evidence",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    Txid(TxidArgs),

    ParsePegin(ParsePeginArgs),

    ParseDispute(ParseDisputeArgs),

    VerifyInclusion(VerifyInclusionArgs),

    Convert(ConvertArgs),

    CheckStake(CheckStakeArgs),

    Params(ParamsArgs),
}

/// A raw transaction given either in its split form or consensus-encoded.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub(crate) struct TxInput {
    #[arg(
        long,
        help = "the transaction as JSON with the hex fields version, input_vector, output_vector and locktime"
    )]
    pub(crate) tx: Option<String>,

    #[arg(long, help = "the consensus-encoded transaction as hex")]
    pub(crate) hex: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Compute the id of a raw transaction", version)]
pub(crate) struct TxidArgs {
    #[clap(flatten)]
    pub(crate) input: TxInput,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Decode the amount and destination of a peg-in transaction", version)]
pub(crate) struct ParsePeginArgs {
    #[clap(flatten)]
    pub(crate) input: TxInput,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Decode the disputed finalization of a dispute transaction", version)]
pub(crate) struct ParseDisputeArgs {
    #[clap(flatten)]
    pub(crate) input: TxInput,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Verify a Merkle inclusion proof", version)]
pub(crate) struct VerifyInclusionArgs {
    #[arg(
        long,
        value_parser = clap::value_parser!(Buf32),
        help = "the Merkle root in internal byte order"
    )]
    pub(crate) root: Buf32,

    #[arg(
        long,
        value_parser = clap::value_parser!(Buf32),
        help = "the leaf (transaction id) in internal byte order"
    )]
    pub(crate) leaf: Buf32,

    #[arg(long, help = "the position of the leaf in the block")]
    pub(crate) index: u64,

    #[arg(
        long = "cohash",
        value_parser = clap::value_parser!(Buf32),
        help = "a sibling hash in internal byte order, from the leaf level up; repeat for every level"
    )]
    pub(crate) cohashes: Vec<Buf32>,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub(crate) struct ConvertDirection {
    #[arg(long, help = "an amount in satoshis to convert into ledger units")]
    pub(crate) to_ledger: Option<u64>,

    #[arg(
        long,
        value_parser = clap::value_parser!(U256),
        help = "an amount in ledger units to convert into satoshis"
    )]
    pub(crate) to_source: Option<U256>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Convert amounts between source-chain and ledger units", version)]
pub(crate) struct ConvertArgs {
    #[clap(flatten)]
    pub(crate) direction: ConvertDirection,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Check an operator collateral against the stake policy", version)]
pub(crate) struct CheckStakeArgs {
    #[arg(long, help = "the path to the params file; the defaults are used if omitted")]
    pub(crate) params: Option<PathBuf>,

    #[arg(long, help = "the collateral in satoshis")]
    pub(crate) amount: u64,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Validate and print a params file", version)]
pub(crate) struct ParamsArgs {
    #[arg(long, help = "the path to the params file")]
    pub(crate) params: PathBuf,
}

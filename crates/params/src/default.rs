//! Default values for the bridge parameters.

use bitcoin::Amount;

/// The default minimum amount of collateral that an operator must post to service a peg-in.
pub const MIN_OPERATOR_STAKE: Amount = Amount::from_int_btc(3);

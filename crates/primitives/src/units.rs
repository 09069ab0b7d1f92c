//! Fixed-point conversion between the source chain's minimal unit and the host ledger's token unit.
//!
//! Both precisions are fixed at build time through const generics. When the ledger is finer than
//! the source chain, converting to ledger units multiplies and is lossless; converting back divides
//! and is exact for every value produced by the forward direction. When the ledger is coarser, the
//! forward direction divides and floors, so any remainder below one ledger unit is lost. Values
//! that reach the registry are always produced by the forward direction.

use bitcoin::Amount;
use ethnum::U256;

use crate::errors::ConversionError;

/// Number of decimals of the source chain's minimal unit (satoshis).
pub const SOURCE_DECIMALS: u32 = 8;

/// Number of decimals of the pegged token on the host ledger.
pub const LEDGER_DECIMALS: u32 = 18;

/// Converts amounts between a source chain with `SOURCE` decimals and a host ledger with `LEDGER`
/// decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitConverter<const SOURCE: u32, const LEDGER: u32>;

/// The converter used by the bridge.
pub type BridgeUnitConverter = UnitConverter<SOURCE_DECIMALS, LEDGER_DECIMALS>;

impl<const SOURCE: u32, const LEDGER: u32> UnitConverter<SOURCE, LEDGER> {
    /// The power of ten separating the two units.
    pub const SCALE_EXPONENT: u32 = SOURCE.abs_diff(LEDGER);

    /// Whether the ledger unit is at least as fine as the source unit.
    pub const LEDGER_IS_FINER: bool = LEDGER >= SOURCE;

    /// Returns `10^SCALE_EXPONENT`.
    pub fn scale() -> U256 {
        let ten = U256::new(10);
        (0..Self::SCALE_EXPONENT).fold(U256::ONE, |acc, _| acc * ten)
    }

    /// Converts an amount in source-chain units into host-ledger units.
    pub fn to_ledger_units(amount: Amount) -> Result<U256, ConversionError> {
        let sats = U256::from(amount.to_sat());

        if Self::LEDGER_IS_FINER {
            sats.checked_mul(Self::scale())
                .ok_or(ConversionError::Overflow)
        } else {
            Ok(sats / Self::scale())
        }
    }

    /// Converts an amount in host-ledger units into source-chain units.
    ///
    /// Any remainder below one source unit is truncated (floor division).
    pub fn to_source_units(amount: U256) -> Result<Amount, ConversionError> {
        let sats = if Self::LEDGER_IS_FINER {
            amount / Self::scale()
        } else {
            amount
                .checked_mul(Self::scale())
                .ok_or(ConversionError::Overflow)?
        };

        u64::try_from(sats)
            .map(Amount::from_sat)
            .map_err(|_| ConversionError::Overflow)
    }
}

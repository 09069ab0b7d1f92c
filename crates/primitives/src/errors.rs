//! Errors for the shared primitives.

use thiserror::Error;

/// Errors that can occur while converting amounts between the source chain and the host ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The converted amount does not fit into the target representation.
    #[error("amount overflows the target unit")]
    Overflow,
}

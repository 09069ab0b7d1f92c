//! Errors that can occur while decoding raw transactions.

use thiserror::Error;

/// Errors raised by the transaction decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A read would go past the end of the buffer.
    #[error("cannot read {requested} bytes at offset {offset} from a buffer of {len} bytes")]
    OutOfBounds {
        /// The offset at which the read was attempted.
        offset: usize,
        /// The number of bytes requested.
        requested: usize,
        /// The length of the buffer.
        len: usize,
    },

    /// A compact-size length does not fit into the platform's address space.
    #[error("compact size {0} does not fit into usize")]
    LengthOverflow(u64),

    /// The output carrying the destination address does not have the expected shape.
    #[error("invalid data-carrier script")]
    InvalidDataCarrierScript,

    /// The output vector has fewer outputs than the transaction role requires.
    #[error("expected at least {expected} outputs, found {found}")]
    MissingOutput {
        /// The minimum number of outputs required.
        expected: u64,
        /// The number of outputs declared.
        found: u64,
    },

    /// The input vector is empty.
    #[error("transaction has no inputs")]
    MissingInput,

    /// A vector has bytes left over after all of its declared items were read.
    #[error("{remaining} trailing bytes after the {field}")]
    TrailingBytes {
        /// The field that was being read.
        field: &'static str,
        /// The number of unread bytes.
        remaining: usize,
    },
}

/// The result type for the transaction decoder.
pub type ParseResult<T> = Result<T, ParseError>;

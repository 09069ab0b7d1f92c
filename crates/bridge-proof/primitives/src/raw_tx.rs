//! Source-chain transactions in their split wire form.

use bitcoin::{consensus::encode::serialize, Transaction, Txid};
use serde::{Deserialize, Serialize};

use crate::{cursor::ByteCursor, errors::ParseResult, utils::sha256d};

/// Size of an outpoint: the referenced txid followed by the output index.
const OUTPOINT_SIZE: usize = 32 + 4;

/// Size of an input's sequence number.
const SEQUENCE_SIZE: usize = 4;

/// Size of an output's amount.
const AMOUNT_SIZE: usize = 8;

/// A serialized transaction split into its four structural fields.
///
/// Each vector holds its compact-size item count followed by the items exactly as they appear on
/// the wire. Witness data is never part of this representation, so hashing the concatenation of
/// the four fields yields the transaction id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTransaction {
    /// The 4-byte little-endian version.
    #[serde(with = "hex::serde")]
    pub version: [u8; 4],

    /// The compact-size input count followed by the inputs.
    #[serde(with = "hex::serde")]
    pub input_vector: Vec<u8>,

    /// The compact-size output count followed by the outputs.
    #[serde(with = "hex::serde")]
    pub output_vector: Vec<u8>,

    /// The 4-byte little-endian locktime.
    #[serde(with = "hex::serde")]
    pub locktime: [u8; 4],
}

impl RawTransaction {
    /// Creates a new raw transaction from its four fields.
    pub const fn new(
        version: [u8; 4],
        input_vector: Vec<u8>,
        output_vector: Vec<u8>,
        locktime: [u8; 4],
    ) -> Self {
        Self {
            version,
            input_vector,
            output_vector,
            locktime,
        }
    }

    /// Returns the version as a host integer.
    pub const fn version(&self) -> u32 {
        u32::from_le_bytes(self.version)
    }

    /// Returns the locktime as a host integer.
    pub const fn locktime(&self) -> u32 {
        u32::from_le_bytes(self.locktime)
    }

    /// Concatenates the four fields in wire order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            self.version.len()
                + self.input_vector.len()
                + self.output_vector.len()
                + self.locktime.len(),
        );

        buf.extend_from_slice(&self.version);
        buf.extend_from_slice(&self.input_vector);
        buf.extend_from_slice(&self.output_vector);
        buf.extend_from_slice(&self.locktime);

        buf
    }

    /// Computes the transaction id: the double SHA-256 of the concatenated fields.
    ///
    /// Equivalent to [`Transaction::compute_txid`] for the transaction these fields were taken
    /// from.
    pub fn compute_id(&self) -> Txid {
        sha256d(&self.to_bytes()).into()
    }

    /// Walks the input vector and returns the number of inputs.
    ///
    /// Fails if any input is truncated or if bytes remain after the declared inputs.
    pub fn input_count(&self) -> ParseResult<u64> {
        let mut cursor = ByteCursor::new(&self.input_vector);
        let count = cursor.read_compact_size()?;

        for _ in 0..count {
            cursor.skip(OUTPOINT_SIZE)?;
            cursor.read_var_bytes()?;
            cursor.skip(SEQUENCE_SIZE)?;
        }

        cursor.finish("input vector")?;

        Ok(count)
    }

    /// Walks the output vector and returns the number of outputs.
    ///
    /// Fails if any output is truncated or if bytes remain after the declared outputs.
    pub fn output_count(&self) -> ParseResult<u64> {
        let mut cursor = ByteCursor::new(&self.output_vector);
        let count = cursor.read_compact_size()?;

        for _ in 0..count {
            cursor.skip(AMOUNT_SIZE)?;
            cursor.read_var_bytes()?;
        }

        cursor.finish("output vector")?;

        Ok(count)
    }

    /// Checks that both vectors are well-formed.
    pub fn validate(&self) -> ParseResult<()> {
        self.input_count()?;
        self.output_count()?;

        Ok(())
    }
}

impl From<&Transaction> for RawTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            version: tx.version.0.to_le_bytes(),
            input_vector: serialize(&tx.input),
            output_vector: serialize(&tx.output),
            locktime: tx.lock_time.to_consensus_u32().to_le_bytes(),
        }
    }
}

impl From<Transaction> for RawTransaction {
    fn from(tx: Transaction) -> Self {
        Self::from(&tx)
    }
}

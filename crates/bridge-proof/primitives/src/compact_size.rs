//! The source chain's variable-length integer encoding.
//!
//! A value below `0xfd` is stored in a single byte. Larger values are stored after a marker byte
//! as a little-endian integer of 2 (`0xfd`), 4 (`0xfe`) or 8 (`0xff`) bytes.

use crate::{
    cursor::ByteCursor,
    errors::{ParseError, ParseResult},
};

/// Marker for a 2-byte compact size.
pub const U16_MARKER: u8 = 0xfd;

/// Marker for a 4-byte compact size.
pub const U32_MARKER: u8 = 0xfe;

/// Marker for an 8-byte compact size.
pub const U64_MARKER: u8 = 0xff;

/// Reads a compact size from `buf` starting at `offset`.
///
/// Returns the decoded value and the offset of the first byte following the encoding.
pub fn read_compact_size(buf: &[u8], offset: usize) -> ParseResult<(u64, usize)> {
    let mut cursor = ByteCursor::at(buf, offset);
    let value = cursor.read_compact_size()?;

    Ok((value, cursor.position()))
}

impl<'a> ByteCursor<'a> {
    /// Reads a compact size.
    pub fn read_compact_size(&mut self) -> ParseResult<u64> {
        let start = self.clone();

        let value = match self.read_u8()? {
            U16_MARKER => self.read_u16_le().map(u64::from),
            U32_MARKER => self.read_u32_le().map(u64::from),
            U64_MARKER => self.read_u64_le(),
            literal => Ok(u64::from(literal)),
        };

        if value.is_err() {
            *self = start;
        }

        value
    }

    /// Reads a compact size that denotes a length or a count.
    pub fn read_compact_len(&mut self) -> ParseResult<usize> {
        let value = self.read_compact_size()?;

        usize::try_from(value).map_err(|_| ParseError::LengthOverflow(value))
    }

    /// Reads a compact-size-prefixed byte string.
    ///
    /// Fails if the declared length exceeds the bytes left in the buffer.
    pub fn read_var_bytes(&mut self) -> ParseResult<&'a [u8]> {
        let start = self.clone();
        let len = self.read_compact_len()?;

        self.take(len).inspect_err(|_| *self = start)
    }
}

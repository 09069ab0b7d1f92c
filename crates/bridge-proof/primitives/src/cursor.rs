//! A bounds-checked reader over an opaque byte buffer.

use crate::errors::{ParseError, ParseResult};

/// Reads fields from a byte buffer while tracking the current offset.
///
/// The cursor only ever moves forward. Every read is checked against the buffer length before any
/// byte is touched, and a failed read leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the start of `buf`.
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Creates a cursor positioned at `offset`.
    ///
    /// The offset is not checked here; the first read past the end of the buffer fails.
    pub const fn at(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, pos: offset }
    }

    /// Returns the offset of the next byte to be read.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes left to read.
    pub const fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Returns the next `n` bytes and advances past them.
    pub fn take(&mut self, n: usize) -> ParseResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or(ParseError::OutOfBounds {
                offset: self.pos,
                requested: n,
                len: self.buf.len(),
            })?;

        let bytes = &self.buf[self.pos..end];
        self.pos = end;

        Ok(bytes)
    }

    /// Advances past the next `n` bytes.
    pub fn skip(&mut self, n: usize) -> ParseResult<()> {
        self.take(n).map(|_| ())
    }

    /// Reads the next `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let bytes = self.take(N)?;

        let mut out = [0u8; N];
        out.copy_from_slice(bytes);

        Ok(out)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ParseResult<u8> {
        self.read_array::<1>().map(|[byte]| byte)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> ParseResult<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> ParseResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64_le(&mut self) -> ParseResult<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Consumes the cursor, failing if any bytes were left unread.
    pub fn finish(self, field: &'static str) -> ParseResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(ParseError::TrailingBytes { field, remaining }),
        }
    }
}

//! Byte cursor threaded through each parsing step.

use crate::decode::short_vec;
use crate::error::CodecError;

/// A read position over a borrowed buffer.
///
/// Every read either consumes exactly the bytes it returns or fails with
/// [`CodecError::UnexpectedEof`] and leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    fn eof(&self, needed: usize) -> CodecError {
        CodecError::UnexpectedEof {
            offset: self.position,
            needed,
            available: self.remaining(),
        }
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8, CodecError> {
        self.bytes
            .get(self.position)
            .copied()
            .ok_or_else(|| self.eof(1))
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Consume `len` bytes and return them as a slice of the buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < len {
            return Err(self.eof(len));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..self.position])
    }

    /// Consume a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let slice = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    /// Consume a compact array length.
    pub fn read_compact_len(&mut self) -> Result<u16, CodecError> {
        let rest = &self.bytes[self.position..];
        match short_vec::decode_len(rest) {
            Ok((len, width)) => {
                self.position += width;
                Ok(len)
            }
            Err(CodecError::UnexpectedEof { .. }) => Err(self.eof(rest.len() + 1)),
            Err(e) => Err(e),
        }
    }

    /// Consume a compact length followed by that many raw bytes.
    pub fn read_compact_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_compact_len()?;
        self.read_bytes(usize::from(len))
    }

    /// Unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}

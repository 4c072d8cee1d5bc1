//! Compact array lengths ("short-vec").
//!
//! Every variable-length array in the wire format is prefixed by its length
//! encoded as a little-endian base-128 integer: 7 value bits per byte, the
//! high bit flags that another byte follows. Lengths fit in a `u16`, so an
//! encoding never exceeds three bytes.

use crate::error::CodecError;

/// Maximum number of bytes a length may occupy.
pub const MAX_ENCODING_LENGTH: usize = 3;

const CONTINUATION_BIT: u8 = 0x80;
const VALUE_MASK: u8 = 0x7f;

/// Decode a compact length from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Over-long forms
/// (e.g. `[0x80, 0x00]` for zero) are accepted; anything longer than three
/// bytes or larger than `u16::MAX` is rejected.
pub fn decode_len(bytes: &[u8]) -> Result<(u16, usize), CodecError> {
    let mut value: u32 = 0;

    for (nth, byte) in bytes.iter().take(MAX_ENCODING_LENGTH).enumerate() {
        value |= u32::from(byte & VALUE_MASK) << (nth * 7);

        if byte & CONTINUATION_BIT == 0 {
            let value = u16::try_from(value).map_err(|_| {
                CodecError::Malformed(format!("compact length {} exceeds u16", value))
            })?;
            return Ok((value, nth + 1));
        }

        if nth == MAX_ENCODING_LENGTH - 1 {
            return Err(CodecError::Malformed(format!(
                "compact length longer than {} bytes",
                MAX_ENCODING_LENGTH
            )));
        }
    }

    // Ran out of input while the continuation bit was still set
    Err(CodecError::UnexpectedEof {
        offset: bytes.len(),
        needed: 1,
        available: 0,
    })
}

/// Append the canonical (shortest) encoding of `len` to `out`.
pub fn encode_len(len: u16, out: &mut Vec<u8>) {
    let mut rem = len;
    loop {
        let mut elem = (rem as u8) & VALUE_MASK;
        rem >>= 7;
        if rem == 0 {
            out.push(elem);
            break;
        }
        elem |= CONTINUATION_BIT;
        out.push(elem);
    }
}

//! Input reading implementation.

use crate::cli::InputSpec;
use crate::error::{Error, Result};
use crate::input::InputSource;
use crate::input::decoder::decode_base64;
use std::fs;
use std::io::{self, Read};

/// Read input bytes from the specified source.
pub fn read_input(spec: &InputSpec) -> Result<Vec<u8>> {
    let source = InputSource::from_spec(spec)?;

    match source {
        InputSource::File(path) => {
            let buffer = fs::read(&path).map_err(|e| Error::IoError {
                path: Some(path.clone()),
                source: e,
            })?;
            log::debug!("read {} byte(s) from {}", buffer.len(), path.display());
            detect_and_decode(buffer)
        }

        InputSource::Bytes(bytes) => Ok(bytes),

        InputSource::Stdin => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| Error::IoError {
                    path: None,
                    source: e,
                })?;
            log::debug!("read {} byte(s) from stdin", buffer.len());
            detect_and_decode(buffer)
        }
    }
}

/// Decode file or stdin content that may be text-encoded.
///
/// UTF-8 content is decoded as `0x`-hex or base64, ignoring whitespace
/// (including line wraps); anything else is taken to be the wire bytes
/// themselves.
fn detect_and_decode(buffer: Vec<u8>) -> Result<Vec<u8>> {
    let Ok(text) = std::str::from_utf8(&buffer) else {
        // Not valid UTF-8, assume binary wire format
        return Ok(buffer);
    };

    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(Error::NoInput);
    }

    if let Some(hex_candidate) = trimmed.strip_prefix("0x") {
        let compact: String = hex_candidate.split_ascii_whitespace().collect();
        return hex::decode(compact).map_err(Error::from);
    }

    Ok(decode_base64(trimmed)?)
}

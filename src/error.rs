//! Error types for soltx.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for soltx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to turn base64/base64url text into bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The text is not valid base64 (bad symbol, dangling bits).
    #[error("invalid base64 encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Failure to parse transaction wire bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before the structure was complete.
    #[error(
        "unexpected end of input at offset {offset}: needed {needed} byte(s), {available} available"
    )]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The message prefix names a version other than 0.
    #[error("unsupported transaction version {0}")]
    UnsupportedVersion(u8),

    /// The signature section is shorter than its declared count.
    #[error(
        "malformed signatures: {count} signature(s) need {needed} bytes, {available} available"
    )]
    MalformedSignature {
        count: usize,
        needed: usize,
        available: usize,
    },

    /// The header counts contradict each other or the account table.
    #[error("invalid message header: {0}")]
    InvalidHeader(String),

    /// An instruction references an account that does not exist.
    #[error(
        "instruction {instruction} references {kind} index {index}, but only {bound} account(s) are addressable"
    )]
    IndexOutOfRange {
        instruction: usize,
        kind: &'static str,
        index: u8,
        bound: usize,
    },

    /// Any other structural violation.
    #[error("malformed transaction: {0}")]
    Malformed(String),
}

/// Errors that can occur in soltx.
#[derive(Error, Debug)]
pub enum Error {
    /// No input was provided (no argument, no file, empty stdin).
    #[error("No input provided. Use: soltx <base64>, soltx <file>, or pipe a transaction to stdin")]
    NoInput,

    /// The specified file was not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// An I/O error occurred.
    #[error(
        "IO error{}: {source}",
        path.as_ref().map(|p| format!(" reading {}", p.display())).unwrap_or_default()
    )]
    IoError {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Invalid `0x`-prefixed hex input.
    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A URL argument that does not carry a usable `tx` parameter.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The input text could not be turned into bytes.
    #[error("Error decoding transaction: {0}")]
    Decode(#[from] DecodeError),

    /// The bytes are not a well-formed transaction.
    #[error("Error decoding transaction: {0}")]
    Codec(#[from] CodecError),

    /// Invalid query syntax.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Requested field was not found.
    #[error("Field not found: '{0}'")]
    FieldNotFound(String),

    /// Array index out of bounds.
    #[error("Index {0} out of bounds")]
    IndexOutOfBounds(usize),

    /// Output formatting error.
    #[error("Format error: {0}")]
    FormatError(String),
}

impl Error {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Validation failure (--check mode)
            Error::Codec(_) => 1,
            // Text encoding errors
            Error::Decode(_) | Error::InvalidHex(_) | Error::InvalidUrl(_) => 2,
            // I/O errors
            Error::NoInput | Error::FileNotFound(_) | Error::IoError { .. } => 3,
            // Query errors
            Error::InvalidQuery(_) | Error::FieldNotFound(_) | Error::IndexOutOfBounds(_) => 4,
            Error::FormatError(_) => 5,
        }
    }
}

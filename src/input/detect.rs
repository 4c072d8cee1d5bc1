//! Input source detection.

use crate::cli::InputSpec;
use crate::error::{Error, Result};
use crate::input::decoder::decode_base64;
use std::io::IsTerminal;
use std::path::PathBuf;
use url::Url;

/// Name of the URL query parameter that carries the transaction.
pub const TX_QUERY_PARAM: &str = "tx";

/// Resolved input source ready for reading.
#[derive(Debug)]
pub enum InputSource {
    /// Read from a file path.
    File(PathBuf),
    /// Text already decoded to bytes.
    Bytes(Vec<u8>),
    /// Read from stdin.
    Stdin,
}

impl InputSource {
    /// Create an InputSource from an InputSpec.
    pub fn from_spec(spec: &InputSpec) -> Result<Self> {
        match spec {
            InputSpec::Stdin => {
                // Check if stdin is a terminal (interactive mode with no piped input)
                if std::io::stdin().is_terminal() {
                    return Err(Error::NoInput);
                }
                Ok(InputSource::Stdin)
            }

            InputSpec::File(path) => {
                if !path.exists() {
                    return Err(Error::FileNotFound(path.clone()));
                }
                Ok(InputSource::File(path.clone()))
            }

            InputSpec::Hex(hex_str) => Ok(InputSource::Bytes(hex::decode(hex_str)?)),

            InputSpec::Base64(text) => Ok(InputSource::Bytes(decode_base64(text)?)),

            InputSpec::Url(url) => {
                let text = tx_param_from_url(url)?;
                Ok(InputSource::Bytes(decode_base64(&text)?))
            }
        }
    }
}

/// Extract the `tx` query parameter from a URL.
///
/// Form decoding turns a literal `+` into a space; those are put back since
/// standard base64 uses `+` and never contains spaces.
pub fn tx_param_from_url(input: &str) -> Result<String> {
    let url = Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{}: {}", input, e)))?;

    let value = url
        .query_pairs()
        .find(|(key, _)| key == TX_QUERY_PARAM)
        .map(|(_, value)| value.replace(' ', "+"))
        .ok_or_else(|| {
            Error::InvalidUrl(format!("no '{}' query parameter in {}", TX_QUERY_PARAM, input))
        })?;

    if value.is_empty() {
        return Err(Error::InvalidUrl(format!(
            "empty '{}' query parameter in {}",
            TX_QUERY_PARAM, input
        )));
    }

    log::debug!("read {} character(s) from the url", value.len());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_hex_input() {
        let spec = InputSpec::Hex("0109ff".to_string());
        let source = InputSource::from_spec(&spec).unwrap();
        match source {
            InputSource::Bytes(b) => assert_eq!(b, vec![0x01, 0x09, 0xff]),
            _ => panic!("Expected Bytes"),
        }
    }

    #[test]
    fn test_invalid_hex() {
        let spec = InputSpec::Hex("zz".to_string());
        assert_matches!(InputSource::from_spec(&spec), Err(Error::InvalidHex(_)));
    }

    #[test]
    fn test_base64_input() {
        let spec = InputSpec::Base64("AQkJ".to_string());
        assert_matches!(
            InputSource::from_spec(&spec),
            Ok(InputSource::Bytes(b)) if b == vec![0x01, 0x09, 0x09]
        );
    }

    #[test]
    fn test_garbage_base64() {
        let spec = InputSpec::Base64("not base64!".to_string());
        assert_matches!(InputSource::from_spec(&spec), Err(Error::Decode(_)));
    }

    #[test]
    fn test_file_not_found() {
        let spec = InputSpec::File(PathBuf::from("/nonexistent/tx.b64"));
        let result = InputSource::from_spec(&spec);
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_url_tx_param() {
        assert_eq!(
            tx_param_from_url("https://example.com/decode?foo=1&tx=AQkJ").unwrap(),
            "AQkJ"
        );
    }

    #[test]
    fn test_url_restores_plus() {
        // Unescaped `+` arrives as a space after form decoding
        assert_eq!(
            tx_param_from_url("https://example.com/?tx=ab+/c").unwrap(),
            "ab+/c"
        );
        assert_eq!(
            tx_param_from_url("https://example.com/?tx=ab%2B%2Fc").unwrap(),
            "ab+/c"
        );
    }

    #[test]
    fn test_url_without_tx() {
        assert_matches!(
            tx_param_from_url("https://example.com/?other=1"),
            Err(Error::InvalidUrl(_))
        );
        assert_matches!(
            tx_param_from_url("https://example.com/?tx="),
            Err(Error::InvalidUrl(_))
        );
    }

    #[test]
    fn test_url_input_decodes() {
        let spec = InputSpec::Url("https://example.com/?tx=AQkJ".to_string());
        assert_matches!(
            InputSource::from_spec(&spec),
            Ok(InputSource::Bytes(b)) if b == vec![0x01, 0x09, 0x09]
        );
    }
}

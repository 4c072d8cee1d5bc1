//! Base64 / base64url text decoding.

use crate::error::DecodeError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use std::borrow::Cow;

/// Standard alphabet, padding optional, lenient about unused trailing bits.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Whether the text uses the URL-safe alphabet.
pub fn is_base64url(text: &str) -> bool {
    text.contains(|c| c == '-' || c == '_')
}

/// Decode base64 or base64url text into bytes.
///
/// ASCII whitespace anywhere in the text is ignored, so line-wrapped output
/// of tools like `base64` decodes as is. URL-safe input (detected by `-` or
/// `_`) is mapped onto the standard alphabet before decoding.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: Cow<'_, str> = if text.contains(|c: char| c.is_ascii_whitespace()) {
        Cow::Owned(text.split_ascii_whitespace().collect())
    } else {
        Cow::Borrowed(text)
    };

    let normalized: Cow<'_, str> = if is_base64url(&compact) {
        log::debug!("input uses the base64url alphabet");
        Cow::Owned(compact.replace('-', "+").replace('_', "/"))
    } else {
        compact
    };

    Ok(LENIENT_STANDARD.decode(normalized.as_bytes())?)
}

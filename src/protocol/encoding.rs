//! Binary-to-text payload encoding.
//!
//! Transports only carry string-safe values, so codec output is placed in an
//! envelope as standard padded base64. The empty byte string encodes to the
//! empty string and back.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CodecError;

/// Encode codec output for use as an envelope `payload`.
#[inline]
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode an envelope `payload` back to codec input.
#[inline]
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(text)?)
}

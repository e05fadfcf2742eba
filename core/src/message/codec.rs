// Heart-rate codec — the value travels as a plain decimal-ASCII integer

use thiserror::Error;

/// Errors raised while decoding an inbound payload.
///
/// All of these are local to the offending message: the receive path logs
/// the error, drops the message, and keeps serving.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed heart-rate payload: {0}")]
    MalformedPayload(String),
}

/// Encode a heart-rate value for the wire: decimal ASCII, no sign, UTF-8.
pub fn encode_heart_rate(value: u32) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Decode a heart-rate payload.
///
/// Rejects empty input, non-UTF-8 bytes, signs, and anything that is not
/// a run of ASCII digits fitting in a `u32`.
pub fn decode_heart_rate(payload: &[u8]) -> Result<u32, CodecError> {
    let text = std::str::from_utf8(payload)
        .map_err(|_| CodecError::MalformedPayload("not valid UTF-8".to_string()))?;

    if text.is_empty() {
        return Err(CodecError::MalformedPayload("empty payload".to_string()));
    }

    // parse() alone would accept a leading '+'
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::MalformedPayload(format!(
            "non-numeric data: {text:?}"
        )));
    }

    text.parse::<u32>()
        .map_err(|e| CodecError::MalformedPayload(format!("{text:?}: {e}")))
}

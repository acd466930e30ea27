//! URL-safe base64 without padding.
//!
//! Encoding swaps `+` and `/` for `-` and `_` and strips `=` padding, so the
//! output can be placed in a query string as-is. Decoding reverses the
//! substitution, restores the padding and decodes with the standard alphabet.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::DecodingError;

/// Encode bytes as unpadded base64url.
///
/// # Examples
///
/// ```
/// use emailengine_sdk::signing::base64url;
///
/// assert_eq!(base64url::encode([0xfb, 0xff]), "-_8");
/// ```
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD
        .encode(bytes)
        .chars()
        .filter_map(|c| match c {
            '+' => Some('-'),
            '/' => Some('_'),
            '=' => None,
            c => Some(c),
        })
        .collect()
}

/// Decode base64url input, with or without padding.
///
/// # Errors
///
/// - `DecodingError::InvalidLength` if the unpadded length leaves a remainder of one
/// - `DecodingError::InvalidEncoding` for characters outside the alphabet
pub fn decode(value: &str) -> Result<Vec<u8>, DecodingError> {
    let mut data: String = value
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    let padding = match data.len() % 4 {
        0 => 0,
        2 => 2,
        3 => 1,
        _ => return Err(DecodingError::InvalidLength { length: value.len() }),
    };
    data.extend(std::iter::repeat('=').take(padding));

    Ok(STANDARD.decode(data)?)
}

/// Decode base64url input, returning an empty vector on malformed input.
///
/// Opt-in leniency for callers that only need a best-effort value; use
/// [`decode`] whenever malformed input has to be told apart from empty input.
pub fn decode_lenient(value: &str) -> Vec<u8> {
    decode(value).unwrap_or_default()
}

#[cfg(test)]
#[path = "base64url_tests.rs"]
mod tests;

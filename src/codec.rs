//! Percent-encoding of NSS bodies and query values.
//!
//! Both the NSS and parameter values go through the same [`ENCODE_SET`], so a
//! value that survives one path survives the other.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::{EncodingError, EncodingErrorKind};

/// Bytes that must be escaped: everything except ASCII letters, digits,
/// `/` and `-`. Non-ASCII bytes are always escaped.
pub const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'/').remove(b'-');

/// Percent-encodes `text` byte by byte over its UTF-8 representation.
///
/// Escapes use two uppercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// assert_eq!(rfc2141::encode("walter sobchak!"), "walter%20sobchak%21");
/// assert_eq!(rfc2141::encode("ü"), "%C3%BC");
/// ```
#[must_use]
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, ENCODE_SET).to_string()
}

/// Decodes every `%XX` escape in `text` and interprets the bytes as UTF-8.
///
/// # Errors
///
/// Returns `EncodingError` if a `%` is not followed by two hexadecimal
/// digits, or if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// assert_eq!(rfc2141::decode("jeff%20lebowski%2540").unwrap(), "jeff lebowski%40");
/// assert!(rfc2141::decode("%G0").is_err());
/// ```
pub fn decode(text: &str) -> Result<String, EncodingError> {
    let bytes = text.as_bytes();
    for (position, _) in text.match_indices('%') {
        let well_formed = bytes
            .get(position + 1..position + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(EncodingError {
                value: text.to_string(),
                kind: EncodingErrorKind::MalformedEscape { position },
            });
        }
    }

    percent_decode_str(text)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| EncodingError {
            value: text.to_string(),
            kind: EncodingErrorKind::InvalidUtf8,
        })
}

/// Decodes grammar-valid text, replacing invalid UTF-8 with `U+FFFD`.
pub(crate) fn decode_lossy(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::{SignError, SignResult};

/// Everything except the RFC 3986 unreserved characters
/// (`ALPHA / DIGIT / "-" / "." / "_" / "~"`).
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode the input as RFC 5849 section 3.6 requires.
///
/// Works on raw bytes: a multi-byte UTF-8 character becomes one `%XX`
/// triplet per byte. Hex digits are always uppercase.
pub fn percent_encode<T>(input: T) -> String
where
    T: AsRef<[u8]>,
{
    percent_encoding::percent_encode(input.as_ref(), OAUTH_ENCODE_SET).to_string()
}

/// Serialize key-value pairs as an `application/x-www-form-urlencoded` body.
pub(crate) fn form_encode<T: Serialize + ?Sized>(form: &T) -> SignResult<String> {
    serde_urlencoded::to_string(form).map_err(|e| SignError::Encoding(e.to_string()))
}

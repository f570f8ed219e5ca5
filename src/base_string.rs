use url::Url;

use crate::encode::percent_encode;
use crate::{Parameters, SignError, SignResult};

/// Parse `url` and require it to be absolute with a host.
pub(crate) fn parse_absolute_url(url: &str) -> SignResult<Url> {
    let parsed = Url::parse(url).map_err(|e| SignError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.cannot_be_a_base() || parsed.host_str().map_or(true, str::is_empty) {
        return Err(SignError::InvalidUrl {
            url: url.to_string(),
            reason: "url has no authority".to_string(),
        });
    }
    Ok(parsed)
}

/// Base string URI of RFC 5849 section 3.4.1.2.
///
/// Scheme, lowercased host, non-default port and path; query and fragment
/// are dropped.
pub fn normalize_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let authority = match (url.scheme(), url.port()) {
        (_, None) | ("http", Some(80)) | ("https", Some(443)) => host,
        (_, Some(port)) => format!("{}:{}", host, port),
    };
    format!("{}://{}{}", url.scheme(), authority, url.path())
}

/// Build the signature base string.
///
/// The parameter component merges `oauth_params`, `body_params` and the
/// query pairs already present on `url`. An empty parameter component still
/// leaves the trailing `&`.
pub fn signature_base(
    method: &str,
    url: &Url,
    oauth_params: &Parameters,
    body_params: &Parameters,
) -> String {
    let mut merged = oauth_params.clone();
    merged.extend(body_params.pairs());
    merged.extend(url.query_pairs());

    [
        method.to_ascii_uppercase(),
        percent_encode(normalize_url(url)),
        percent_encode(merged.normalize()),
    ]
    .join("&")
}

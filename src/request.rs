use http::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use http::Method;
use url::Url;

use crate::{SignError, SignResult};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A fully signed request, ready to hand to an HTTP client.
///
/// Everything here must be sent exactly as is: re-encoding the body or
/// the query invalidates the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method: Method,
    url: Url,
    body: Option<String>,
    authorization: String,
}

impl SignedRequest {
    pub(crate) fn new(
        method: Method,
        url: Url,
        body: Option<String>,
        authorization: String,
    ) -> Self {
        SignedRequest {
            method,
            url,
            body,
            authorization,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Form-urlencoded body; empty for requests without one.
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| FORM_CONTENT_TYPE)
    }

    /// Byte length of the body, when there is one.
    pub fn content_length(&self) -> Option<usize> {
        self.body.as_ref().map(String::len)
    }

    /// Headers to send with this request.
    pub fn headers(&self) -> SignResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&self.authorization)?);
        if let (Some(content_type), Some(content_length)) =
            (self.content_type(), self.content_length())
        {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
        }
        Ok(headers)
    }

    /// Turn this request into a `reqwest::RequestBuilder` on `client`.
    pub fn into_reqwest(self, client: &reqwest::Client) -> SignResult<reqwest::RequestBuilder> {
        let headers = self.headers()?;
        let builder = client.request(self.method, self.url).headers(headers);
        Ok(match self.body {
            Some(body) => builder.body(body),
            None => builder,
        })
    }

    /// Blocking counterpart of [`SignedRequest::into_reqwest`].
    #[cfg(feature = "blocking")]
    pub fn into_blocking(
        self,
        client: &reqwest::blocking::Client,
    ) -> SignResult<reqwest::blocking::RequestBuilder> {
        let headers = self.headers()?;
        let builder = client.request(self.method, self.url).headers(headers);
        Ok(match self.body {
            Some(body) => builder.body(body),
            None => builder,
        })
    }
}

fn header_value(value: &str) -> SignResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| SignError::Encoding(e.to_string()))
}

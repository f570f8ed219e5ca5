use http::Method;

use crate::base_string::{normalize_url, parse_absolute_url};
use crate::encode::form_encode;
use crate::{
    NonceSource, OAuthParameters, Parameters, Secrets, SignResult, SignedRequest, Signer,
    SystemNonce,
};

/// Holds one credential set and turns request descriptions into
/// [`SignedRequest`]s.
///
/// Building a request never mutates the client, so a single instance can be
/// shared between threads.
#[derive(Debug, Clone)]
pub struct Client<TNonceSource = SystemNonce> {
    secrets: Secrets,
    parameters: OAuthParameters<'static>,
    nonce_source: TNonceSource,
}

impl Client<SystemNonce> {
    /// Constructs a new `Client` signing with HMAC-SHA1.
    pub fn new(secrets: Secrets) -> Self {
        Client {
            secrets,
            parameters: OAuthParameters::new(),
            nonce_source: SystemNonce,
        }
    }
}

impl From<Secrets> for Client<SystemNonce> {
    fn from(secrets: Secrets) -> Self {
        Client::new(secrets)
    }
}

impl<TNonceSource> Client<TNonceSource>
where
    TNonceSource: NonceSource,
{
    /// Use `parameters` (realm, callback, verifier, signature method) for
    /// every request.
    pub fn with_parameters(self, parameters: OAuthParameters<'static>) -> Self {
        Client { parameters, ..self }
    }

    /// Replace the source of `oauth_nonce` / `oauth_timestamp`.
    pub fn with_nonce_source<T>(self, nonce_source: T) -> Client<T>
    where
        T: NonceSource,
    {
        Client {
            secrets: self.secrets,
            parameters: self.parameters,
            nonce_source,
        }
    }

    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    fn signer(&self) -> Signer<'_, Secrets, &TNonceSource> {
        Signer::new(&self.secrets, self.parameters.clone()).nonce_source(&self.nonce_source)
    }

    /// Build a signed `GET` request.
    ///
    /// `params` are appended to the query string of `url`; the request has
    /// no body.
    ///
    /// # Errors
    ///
    /// This method fails whenever `url` is not an absolute URL or the
    /// configured signature method is not supported.
    pub fn get(&self, url: &str, params: &Parameters) -> SignResult<SignedRequest> {
        let mut url = parse_absolute_url(url)?;
        url.set_fragment(None);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.pairs());
        }
        if let Some("") = url.query() {
            url.set_query(None);
        }

        let authorization =
            self.signer()
                .authorization_header_for(Method::GET.as_str(), &url, &Parameters::new())?;

        tracing::debug!(method = %Method::GET, url = %normalize_url(&url), "signed request");
        Ok(SignedRequest::new(Method::GET, url, None, authorization))
    }

    /// Build a signed `POST` request with a form-urlencoded body.
    ///
    /// The query string of `url` is removed; its pairs travel in the body
    /// together with `form`, and both are signed.
    ///
    /// # Errors
    ///
    /// This method fails whenever `url` is not an absolute URL or the
    /// configured signature method is not supported.
    pub fn post(&self, url: &str, form: &Parameters) -> SignResult<SignedRequest> {
        let mut url = parse_absolute_url(url)?;
        url.set_fragment(None);
        let mut body_params: Parameters = url.query_pairs().collect();
        body_params.extend(form.pairs());
        url.set_query(None);

        let authorization =
            self.signer()
                .authorization_header_for(Method::POST.as_str(), &url, &body_params)?;
        let body = form_encode(&body_params.pairs().collect::<Vec<_>>())?;

        tracing::debug!(
            method = %Method::POST,
            url = %normalize_url(&url),
            content_length = body.len(),
            "signed request"
        );
        Ok(SignedRequest::new(Method::POST, url, Some(body), authorization))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use http::Method;

    use crate::{Client, FixedNonce, OAuthParameters, Parameters, Secrets, SignError};

    fn header_value<'a>(auth_header: &'a str, key: &str) -> Option<&'a str> {
        auth_header
            .strip_prefix("OAuth ")?
            .split(',')
            .filter_map(|item| item.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.trim_matches('"'))
    }

    fn client() -> Client<FixedNonce> {
        Client::new(Secrets::new("ck", "cs").token("tk", "ts"))
            .with_nonce_source(FixedNonce::new("nonce123", 1_400_000_000))
    }

    #[test]
    fn get_known_vector() {
        let request = client()
            .get("http://EXAMPLE.com:80/resource?b=2&a=1", &Parameters::new())
            .unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().as_str(), "http://example.com/resource?b=2&a=1");
        assert_eq!(request.body(), "");
        assert_eq!(request.content_length(), None);
        assert_eq!(
            header_value(request.authorization(), "oauth_signature"),
            Some("n9nB4il5PcAaZCMNLxAb9qyfZT0%3D")
        );
    }

    #[test]
    fn get_merges_params_into_query() {
        let request = client()
            .get(
                "https://api.example.com/1.1/statuses/home_timeline.json?count=5",
                &Parameters::from([("since_id", "10")]),
            )
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/1.1/statuses/home_timeline.json?count=5&since_id=10"
        );
        assert_eq!(
            header_value(request.authorization(), "oauth_signature"),
            Some("nr5PPpvL7MRLRTEITQkTFHdBYdU%3D")
        );
    }

    #[test]
    fn get_with_repeated_keys() {
        let request = Client::new(Secrets::new("ck", "cs"))
            .with_nonce_source(FixedNonce::new("nonce123", 1_400_000_000))
            .get(
                "https://api.example.com/search#top",
                &Parameters::from([("q", "b"), ("q", "a")]),
            )
            .unwrap();
        assert_eq!(request.url().as_str(), "https://api.example.com/search?q=b&q=a");
        assert_eq!(
            header_value(request.authorization(), "oauth_signature"),
            Some("xrTtYKp03Hfrqc%2F0jXOSQ4Kv6yU%3D")
        );
    }

    #[test]
    fn get_without_params_leaves_no_dangling_query() {
        let request = client()
            .get("https://api.example.com/1.1/account/verify_credentials.json", &Parameters::new())
            .unwrap();
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn post_form_body() {
        let request = client()
            .post(
                "https://api.example.com/1.1/statuses/update.json",
                &Parameters::from([("status", "hello world")]),
            )
            .unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.body(), "status=hello+world");
        assert_eq!(request.content_length(), Some(18));
        assert_eq!(
            request.content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            header_value(request.authorization(), "oauth_signature"),
            Some("F2GfzqSxjFQJqvHzn3cAFbomOc8%3D")
        );
    }

    #[test]
    fn post_moves_query_into_body() {
        let with_query = client()
            .post(
                "https://api.example.com/1.1/statuses/update.json?status=hello%20world",
                &Parameters::new(),
            )
            .unwrap();
        assert_eq!(
            with_query.url().as_str(),
            "https://api.example.com/1.1/statuses/update.json"
        );
        assert_eq!(with_query.body(), "status=hello+world");

        let plain = client()
            .post(
                "https://api.example.com/1.1/statuses/update.json",
                &Parameters::from([("status", "hello world")]),
            )
            .unwrap();
        assert_eq!(with_query.authorization(), plain.authorization());
    }

    #[test]
    fn post_content_length_counts_bytes() {
        let request = client()
            .post(
                "https://api.example.com/1.1/account/update_profile.json",
                &Parameters::from([("name", "少女")]),
            )
            .unwrap();
        assert_eq!(request.body(), "name=%E5%B0%91%E5%A5%B3");
        assert_eq!(request.content_length(), Some(request.body().len()));
        assert_eq!(request.content_length(), Some(23));
    }

    #[test]
    fn errors_are_propagated() {
        let err = client().get("/path", &Parameters::new()).unwrap_err();
        assert!(matches!(err, SignError::InvalidUrl { .. }));

        let err = client()
            .with_parameters(OAuthParameters::new().signature_method("RSA-SHA1"))
            .post("https://api.example.com/", &Parameters::new())
            .unwrap_err();
        assert_eq!(
            err,
            SignError::UnsupportedSignatureMethod("RSA-SHA1".to_string())
        );
    }

    #[test]
    fn every_request_gets_a_fresh_nonce() {
        let client = Client::new(Secrets::new("ck", "cs").token("tk", "ts"));
        let nonces: HashSet<String> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (0..50)
                            .map(|_| {
                                let request = client
                                    .get("https://api.example.com/", &Parameters::new())
                                    .unwrap();
                                header_value(request.authorization(), "oauth_nonce")
                                    .unwrap()
                                    .to_string()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });
        assert_eq!(nonces.len(), 200);
    }

    #[test]
    fn into_reqwest_sends_what_was_signed() {
        let signed = client()
            .post(
                "https://api.example.com/1.1/statuses/update.json",
                &Parameters::from([("status", "hello world")]),
            )
            .unwrap();
        let authorization = signed.authorization().to_string();
        let request = signed
            .into_reqwest(&reqwest::Client::new())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers()[http::header::AUTHORIZATION],
            authorization.as_str()
        );
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(&b"status=hello+world"[..])
        );
    }
}

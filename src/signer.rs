use std::borrow::Cow;

use url::Url;

use crate::base_string::{parse_absolute_url, signature_base};
use crate::{
    NonceSource, Parameters, SecretsProvider, SignResult, SignatureMethod, SystemNonce,
    OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY,
    OAUTH_VERSION, OAUTH_VERSION_KEY, REALM_KEY,
};

const AUTHORIZATION_SCHEME: &str = "OAuth ";

/// Builds `Authorization` header values for one set of credentials.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider, TNonceSource = SystemNonce>
where
    TSecretsProvider: SecretsProvider,
    TNonceSource: NonceSource,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters<'a>,
    nonce_source: TNonceSource,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider, SystemNonce>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters<'a>) -> Self {
        Signer {
            secrets,
            parameters,
            nonce_source: SystemNonce,
        }
    }
}

impl<'a, TSecretsProvider, TNonceSource> Signer<'a, TSecretsProvider, TNonceSource>
where
    TSecretsProvider: SecretsProvider,
    TNonceSource: NonceSource,
{
    /// Replace the source of `oauth_nonce` / `oauth_timestamp`.
    pub fn nonce_source<T>(self, nonce_source: T) -> Signer<'a, TSecretsProvider, T>
    where
        T: NonceSource,
    {
        Signer {
            secrets: self.secrets,
            parameters: self.parameters,
            nonce_source,
        }
    }

    /// Sign a request and render its `Authorization` header value.
    ///
    /// `body_params` are the form parameters sent in the request body; query
    /// parameters are read from `url` itself.
    ///
    /// # Errors
    ///
    /// [`SignError::InvalidUrl`](crate::SignError::InvalidUrl) when `url` is
    /// not absolute, and
    /// [`SignError::UnsupportedSignatureMethod`](crate::SignError::UnsupportedSignatureMethod)
    /// when the configured method is neither `HMAC-SHA1` nor `PLAINTEXT`.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        body_params: &Parameters,
    ) -> SignResult<String> {
        let url = parse_absolute_url(url).map_err(|err| {
            tracing::debug!(error = %err, "refusing to sign request");
            err
        })?;
        self.authorization_header_for(method, &url, body_params)
    }

    pub(crate) fn authorization_header_for(
        &self,
        method: &str,
        url: &Url,
        body_params: &Parameters,
    ) -> SignResult<String> {
        let signature_method = self
            .parameters
            .signature_method
            .parse::<SignatureMethod>()
            .map_err(|err| {
                tracing::debug!(error = %err, "refusing to sign request");
                err
            })?;

        let (nonce, timestamp) = if signature_method.uses_nonce() {
            (
                Some(self.nonce_source.nonce()),
                Some(self.nonce_source.timestamp()),
            )
        } else {
            (None, None)
        };

        let mut oauth_params = self.oauth_parameters(signature_method, nonce, timestamp);
        let base = signature_base(method, url, &oauth_params, body_params);

        let (_, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (_, token_secret) = self.secrets.get_token_option_pair();
        let signature =
            signature_method.sign(&base, consumer_secret, token_secret.unwrap_or_default())?;
        oauth_params.insert(OAUTH_SIGNATURE_KEY, signature);

        Ok(render_header(&oauth_params))
    }

    /// The `oauth_*` (and `realm`) parameters that take part in signing.
    ///
    /// Empty values are left out; `oauth_version` is always present.
    fn oauth_parameters(
        &self,
        signature_method: SignatureMethod,
        nonce: Option<String>,
        timestamp: Option<u64>,
    ) -> Parameters {
        let (consumer_key, _) = self.secrets.get_consumer_key_pair();
        let (token, _) = self.secrets.get_token_option_pair();

        let candidates = [
            (OAUTH_VERSION_KEY, Some(Cow::Borrowed(OAUTH_VERSION))),
            (REALM_KEY, self.parameters.realm.clone()),
            (OAUTH_CONSUMER_KEY, Some(Cow::Borrowed(consumer_key))),
            (OAUTH_TOKEN_KEY, token.map(Cow::Borrowed)),
            (
                OAUTH_SIGNATURE_METHOD_KEY,
                Some(Cow::Borrowed(signature_method.as_str())),
            ),
            (OAUTH_TIMESTAMP_KEY, timestamp.map(|t| Cow::Owned(t.to_string()))),
            (OAUTH_NONCE_KEY, nonce.map(Cow::Owned)),
            (OAUTH_CALLBACK_KEY, self.parameters.callback.clone()),
            (OAUTH_VERIFIER_KEY, self.parameters.verifier.clone()),
        ];

        candidates
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect()
    }
}

/// `OAuth k1="v1",k2="v2",...` with keys and values percent-encoded and
/// pairs sorted by encoded key, then encoded value.
fn render_header(oauth_params: &Parameters) -> String {
    let pairs = oauth_params
        .encoded_pairs()
        .into_iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}{}", AUTHORIZATION_SCHEME, pairs)
}

/// Per-request OAuth options besides the credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParameters<'a> {
    callback: Option<Cow<'a, str>>,
    realm: Option<Cow<'a, str>>,
    signature_method: Cow<'a, str>,
    verifier: Option<Cow<'a, str>>,
}

impl Default for OAuthParameters<'_> {
    fn default() -> Self {
        OAuthParameters {
            callback: None,
            realm: None,
            signature_method: Cow::Borrowed(SignatureMethod::HmacSha1.as_str()),
            verifier: None,
        }
    }
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_callback value
    pub fn callback<T>(self, callback: T) -> OAuthParameters<'a>
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// set the realm value
    ///
    /// # Note
    /// The realm is rendered in the header and is also included in the
    /// signature base string, which RFC 5849 section 3.4.1.3.1 excludes.
    /// Only set it for verifiers that sign it the same way.
    pub fn realm<T>(self, realm: T) -> OAuthParameters<'a>
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// set the oauth_signature_method value
    ///
    /// Accepts any identifier; anything other than `HMAC-SHA1` or
    /// `PLAINTEXT` is rejected when the request is signed.
    pub fn signature_method<T>(self, signature_method: T) -> OAuthParameters<'a>
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            signature_method: signature_method.into(),
            ..self
        }
    }

    /// set the oauth_verifier value
    pub fn verifier<T>(self, verifier: T) -> OAuthParameters<'a>
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            verifier: Some(verifier.into()),
            ..self
        }
    }
}

impl<'a> From<SignatureMethod> for Cow<'a, str> {
    fn from(method: SignatureMethod) -> Self {
        Cow::Borrowed(method.as_str())
    }
}

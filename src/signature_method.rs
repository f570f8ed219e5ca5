use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::encode::percent_encode;
use crate::{SignError, SignResult};

type HmacSha1 = Hmac<Sha1>;

const HMAC_SHA1: &str = "HMAC-SHA1";
const PLAINTEXT: &str = "PLAINTEXT";

/// Supported values of `oauth_signature_method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
    HmacSha1,
    Plaintext,
}

impl SignatureMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => HMAC_SHA1,
            SignatureMethod::Plaintext => PLAINTEXT,
        }
    }

    /// Whether requests signed this way carry `oauth_nonce` and `oauth_timestamp`.
    pub fn uses_nonce(&self) -> bool {
        !matches!(self, SignatureMethod::Plaintext)
    }

    /// Sign `base_string` with the key derived from the two secrets.
    ///
    /// A missing token secret is passed as `""`; the key then ends in `&`.
    pub fn sign(
        &self,
        base_string: &str,
        consumer_secret: &str,
        token_secret: &str,
    ) -> SignResult<String> {
        let key = signing_key(consumer_secret, token_secret);
        match self {
            SignatureMethod::HmacSha1 => {
                let mut mac = HmacSha1::new_from_slice(key.as_bytes())
                    .map_err(|e| SignError::Encoding(e.to_string()))?;
                mac.update(base_string.as_bytes());
                Ok(STANDARD.encode(mac.finalize().into_bytes()))
            }
            SignatureMethod::Plaintext => Ok(key),
        }
    }
}

fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

impl Default for SignatureMethod {
    fn default() -> Self {
        SignatureMethod::HmacSha1
    }
}

impl FromStr for SignatureMethod {
    type Err = SignError;

    fn from_str(s: &str) -> SignResult<Self> {
        match s {
            HMAC_SHA1 => Ok(SignatureMethod::HmacSha1),
            PLAINTEXT => Ok(SignatureMethod::Plaintext),
            other => Err(SignError::UnsupportedSignatureMethod(other.to_string())),
        }
    }
}

impl AsRef<str> for SignatureMethod {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SignatureMethod;
    use crate::SignError;

    // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
    const TWITTER_BASE: &str = "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json\
        &include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog\
        %26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg\
        %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958\
        %26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\
        %26oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen\
        %252C%2520a%2520signed%2520OAuth%2520request%2521";

    #[test]
    fn hmac_sha1_matches_published_example() {
        let sign = SignatureMethod::HmacSha1
            .sign(
                TWITTER_BASE,
                "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
                "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
            )
            .unwrap();
        assert_eq!(sign, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn plaintext_is_the_key() {
        let sign = SignatureMethod::Plaintext
            .sign("ignored", "kd94hf93k423kf44", "pfkkdhi9sl3r4s00")
            .unwrap();
        assert_eq!(sign, "kd94hf93k423kf44&pfkkdhi9sl3r4s00");

        let sign = SignatureMethod::Plaintext
            .sign("ignored", "s3cr&t", "")
            .unwrap();
        assert_eq!(sign, "s3cr%26t&");
    }

    #[test]
    fn one_character_changes_the_signature() {
        let original = SignatureMethod::HmacSha1.sign(TWITTER_BASE, "cs", "ts").unwrap();
        let perturbed = TWITTER_BASE.replacen("POST", "PUST", 1);
        assert_ne!(
            original,
            SignatureMethod::HmacSha1.sign(&perturbed, "cs", "ts").unwrap()
        );
        assert_ne!(
            original,
            SignatureMethod::HmacSha1.sign(TWITTER_BASE, "cs", "tt").unwrap()
        );
    }

    #[test]
    fn parses_identifiers() {
        assert_eq!("HMAC-SHA1".parse::<SignatureMethod>(), Ok(SignatureMethod::HmacSha1));
        assert_eq!("PLAINTEXT".parse::<SignatureMethod>(), Ok(SignatureMethod::Plaintext));
        assert_eq!(
            "RSA-SHA1".parse::<SignatureMethod>(),
            Err(SignError::UnsupportedSignatureMethod("RSA-SHA1".to_string()))
        );
        assert_eq!(SignatureMethod::default().to_string(), "HMAC-SHA1");
    }
}

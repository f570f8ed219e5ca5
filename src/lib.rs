/*!
oauth1-signer: OAuth 1.0a request signing.

# Overview

This library computes OAuth 1.0a ([RFC 5849](https://tools.ietf.org/html/rfc5849))
signatures and `Authorization` headers, byte for byte the way the remote
verifier recomputes them, and hands back a [`SignedRequest`] that any HTTP
client can send. A [`reqwest`](https://crates.io/crates/reqwest) adapter is
included.

Supported signature methods are `HMAC-SHA1` and `PLAINTEXT`.

# How to use

## Basic usecase 1 - sending the tweet

```rust
use oauth1_signer::{Client, Parameters, Secrets};

// prepare authorization info
let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .token("[ACCESS_TOKEN]", "[TOKEN_SECRET]");
let client = Client::new(secrets);

let request = client.post(
    "https://api.twitter.com/1.1/statuses/update.json",
    &Parameters::from([("status", "Hello, Twitter!")]),
)?;

assert_eq!(request.body(), "status=Hello%2C+Twitter%21");
assert_eq!(request.content_length(), Some(26));
assert!(request.authorization().starts_with("OAuth oauth_consumer_key="));

// send it with reqwest, exactly as signed
let builder = request.into_reqwest(&reqwest::Client::new())?;
# drop(builder);
# Ok::<(), oauth1_signer::SignError>(())
```

## Basic usecase 2 - signing with a fixed nonce

```rust
use oauth1_signer::{FixedNonce, OAuthParameters, Parameters, Secrets, Signer};

let secrets = Secrets::new("ck", "cs").token("tk", "ts");
let signer = Signer::new(&secrets, OAuthParameters::new())
    .nonce_source(FixedNonce::new("nonce123", 1_400_000_000));

let header = signer.authorization_header(
    "GET",
    "http://EXAMPLE.com:80/resource?b=2&a=1",
    &Parameters::new(),
)?;
assert!(header.contains("oauth_signature=\"n9nB4il5PcAaZCMNLxAb9qyfZT0%3D\""));
# Ok::<(), oauth1_signer::SignError>(())
```
*/
mod base_string;
mod client;
mod encode;
mod error;
mod nonce;
mod params;
mod request;
mod secrets;
mod signature_method;
mod signer;

// exposed to external program
pub use base_string::{normalize_url, signature_base};
pub use client::Client;
pub use encode::percent_encode;
pub use error::{SignError, SignResult};
pub use nonce::{FixedNonce, NonceSource, SystemNonce, NONCE_LENGTH};
pub use params::Parameters;
pub use request::SignedRequest;
pub use secrets::{Secrets, SecretsProvider};
pub use signature_method::SignatureMethod;
pub use signer::{OAuthParameters, Signer};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";

// crate-private constant variables
pub(crate) const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub(crate) const OAUTH_TOKEN_KEY: &str = "oauth_token";
pub(crate) const OAUTH_VERSION: &str = "1.0";

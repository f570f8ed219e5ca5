use thiserror::Error;

pub type SignResult<T> = std::result::Result<T, SignError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("invalid url {url:?} : {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("unsupported oauth_signature_method : {0}, must be HMAC-SHA1 or PLAINTEXT.")]
    UnsupportedSignatureMethod(String),
    #[error("failed to encode request : {0}")]
    Encoding(String),
}

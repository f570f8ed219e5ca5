use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Length of a generated `oauth_nonce`.
pub const NONCE_LENGTH: usize = 42;

/// Source of `oauth_nonce` and `oauth_timestamp` values.
pub trait NonceSource {
    fn nonce(&self) -> String;

    /// Seconds since the Unix epoch.
    fn timestamp(&self) -> u64;
}

impl<T: NonceSource + ?Sized> NonceSource for &T {
    fn nonce(&self) -> String {
        (**self).nonce()
    }

    fn timestamp(&self) -> u64 {
        (**self).timestamp()
    }
}

/// Random alphanumeric nonces and the system clock.
///
/// Each thread draws from its own `thread_rng`, so no lock is shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNonce;

impl NonceSource for SystemNonce {
    fn nonce(&self) -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect()
    }

    fn timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// Always yields the same nonce and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNonce {
    nonce: String,
    timestamp: u64,
}

impl FixedNonce {
    pub fn new<T: Into<String>>(nonce: T, timestamp: u64) -> Self {
        FixedNonce {
            nonce: nonce.into(),
            timestamp,
        }
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.nonce.clone()
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

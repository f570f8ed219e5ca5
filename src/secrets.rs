use serde::Deserialize;

pub trait SecretsProvider {
    fn get_consumer_key_pair<'a>(&'a self) -> (&'a str, &'a str);

    fn get_token_pair_option<'a>(&'a self) -> Option<(&'a str, &'a str)>;

    fn get_token_option_pair<'a>(&'a self) -> (Option<&'a str>, Option<&'a str>) {
        self.get_token_pair_option()
            .map(|s| (Some(s.0), Some(s.1)))
            .unwrap_or_else(|| (None, None))
    }
}

impl<T: SecretsProvider + ?Sized> SecretsProvider for &T {
    fn get_consumer_key_pair<'a>(&'a self) -> (&'a str, &'a str) {
        (**self).get_consumer_key_pair()
    }

    fn get_token_pair_option<'a>(&'a self) -> Option<(&'a str, &'a str)> {
        (**self).get_token_pair_option()
    }
}

/// Consumer credentials, optionally paired with an access token.
///
/// Deserializes from any serde source:
///
/// ```toml
/// consumer_key = "..."
/// consumer_secret = "..."
/// token = "..."          # optional
/// token_secret = "..."   # optional
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Secrets {
    consumer_key: String,
    consumer_secret: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    token_secret: Option<String>,
}

impl Secrets {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
            token_secret: None,
        }
    }

    pub fn token<TKey, TSecret>(self, token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            token: Some(token.into()),
            token_secret: Some(token_secret.into()),
            ..self
        }
    }
}

impl SecretsProvider for Secrets {
    fn get_consumer_key_pair<'a>(&'a self) -> (&'a str, &'a str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair_option<'a>(&'a self) -> Option<(&'a str, &'a str)> {
        self.token
            .as_deref()
            .map(|token| (token, self.token_secret.as_deref().unwrap_or_default()))
    }
}

use std::collections::BTreeMap;

use crate::encode::percent_encode;

/// A multi-valued set of request parameters.
///
/// A key may carry several values (`q=a&q=b` is legal in OAuth). The order in
/// which values are inserted does not affect the normalized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    inner: BTreeMap<String, Vec<String>>,
}

impl Parameters {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a value for `key`, keeping any values already present.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style variant of [`Parameters::insert`].
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(key, value);
        self
    }

    /// Values stored for `key`, in insertion order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of key-value pairs, counting every value of a repeated key.
    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every key-value pair. Keys come out sorted, values in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.inner
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Percent-encoded pairs sorted by encoded key, then encoded value.
    pub(crate) fn encoded_pairs(&self) -> Vec<(String, String)> {
        let mut encoded: Vec<(String, String)> = self
            .pairs()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        encoded.sort();
        encoded
    }

    /// The "normalized request parameters" string of RFC 5849 section 3.4.1.3.2.
    ///
    /// Empty only when the set itself is empty.
    pub fn normalize(&self) -> String {
        self.encoded_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

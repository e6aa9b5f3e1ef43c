//! Query string canonicalization.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

/// Decoded `key=value` pairs from a query string.
///
/// Parsing percent-decodes keys and values (with `+` as space) and keeps
/// repeated keys as separate pairs. [`fmt::Display`] re-encodes them with
/// form encoding, so a decode/encode round trip canonicalizes the escapes.
///
/// # Examples
///
/// ```
/// use url_normalize::QueryPairs;
///
/// let mut query = QueryPairs::parse("b=2&a=foo's+bar");
/// query.sort();
/// assert_eq!(query.to_string(), "a=foo%27s+bar&b=2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Creates an empty set of pairs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw query string (without leading '?').
    ///
    /// Empty segments between `&` are skipped; a segment without `=` becomes
    /// a pair with an empty value. Invalid escapes are kept literally and
    /// invalid UTF-8 is replaced.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let pairs = form_urlencoded::parse(input.as_bytes())
            .into_owned()
            .collect();
        Self { pairs }
    }

    /// Sorts pairs by key in byte order. Pairs sharing a key keep their
    /// relative order.
    pub fn sort(&mut self) {
        self.pairs.sort_by(|a, b| a.0.cmp(&b.0));
    }

    /// Returns the first value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns an iterator over the decoded pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryPairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&encoded)
    }
}

impl FromStr for QueryPairs {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryPairs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Decodes a raw query, sorts it by key and re-encodes it.
#[must_use]
pub fn canonicalize_query(raw: &str) -> String {
    let mut pairs = QueryPairs::parse(raw);
    pairs.sort();
    pairs.to_string()
}

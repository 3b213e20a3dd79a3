//! Query parameters of a URN.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::convert::Infallible;
use std::fmt;

use crate::codec;
use crate::constants::{PARAM_SEPARATOR, QUERY_MARKER, VALUE_SEPARATOR, WILDCARD};
use crate::error::EncodingError;

/// Decoded query parameters of a URN.
///
/// Keys are kept sorted, so encoding is deterministic: two maps holding the
/// same pairs encode to the same suffix regardless of insertion order.
/// Keys are never percent-encoded; values always are.
///
/// # Examples
///
/// ```
/// use rfc2141::Params;
///
/// let params = Params::decode("urn:test:x?b=2&a=hello%20world&flag").unwrap();
/// assert_eq!(params.get("a"), Some("hello world"));
/// assert_eq!(params.get("flag"), Some(""));
/// assert_eq!(params.encode(), "?a=hello%20world&b=2&flag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Params {
    params: BTreeMap<String, String>,
}

impl Params {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the query part of a URN text.
    ///
    /// Everything after the first `?` is the query; a text without one has
    /// no parameters. A trailing wildcard `*` is not part of the query.
    /// A pair without `=` maps to an empty value.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if a value is not valid percent-encoded UTF-8.
    pub fn decode(text: &str) -> Result<Self, EncodingError> {
        Self::collect(text, codec::decode)
    }

    /// Decodes the query part of grammar-valid text, lossily.
    pub(crate) fn decode_validated(text: &str) -> Self {
        let Ok(params) = Self::collect(text, |value| Ok::<_, Infallible>(codec::decode_lossy(value)));
        params
    }

    fn collect<E>(text: &str, decode: impl Fn(&str) -> Result<String, E>) -> Result<Self, E> {
        let mut params = BTreeMap::new();

        let Some(query) = query_part(text) else {
            return Ok(Self { params });
        };

        for pair in query.split(PARAM_SEPARATOR) {
            if pair.is_empty() {
                continue;
            }

            let (name, value) = match pair.split_once(VALUE_SEPARATOR) {
                Some((name, value)) => (name, decode(value)?),
                None => (pair, String::new()),
            };

            params.insert(name.to_string(), value);
        }

        Ok(Self { params })
    }

    /// Encodes the parameters as a `?`-prefixed query suffix.
    ///
    /// An empty map encodes to the empty string. Pairs are emitted in
    /// ascending key order, and `=value` only for non-empty values.
    #[must_use]
    pub fn encode(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }

        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.clone()
                } else {
                    format!("{k}{VALUE_SEPARATOR}{}", codec::encode(v))
                }
            })
            .collect();
        format!("{QUERY_MARKER}{}", pairs.join("&"))
    }

    /// Returns the value for a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns true if the parameter is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Sets a parameter, returning the previous value if it was present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.params.insert(name.into(), value.into())
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns the parameter names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Returns an iterator over the parameters in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decodes the query part of `text` into [`Params`].
///
/// # Errors
///
/// Returns `EncodingError` if a value is not valid percent-encoded UTF-8.
pub fn decode_params(text: &str) -> Result<Params, EncodingError> {
    Params::decode(text)
}

/// Encodes `params` as a `?`-prefixed query suffix, or `""` when empty.
#[must_use]
pub fn encode_params(params: &Params) -> String {
    params.encode()
}

/// The query of a URN text, without the leading `?` or a trailing wildcard.
fn query_part(text: &str) -> Option<&str> {
    let (_, query) = text.split_once(QUERY_MARKER)?;
    Some(query.strip_suffix(WILDCARD).unwrap_or(query))
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodingErrorKind;

    #[test]
    fn decode_without_query() {
        let params = Params::decode("urn:test:x").unwrap();
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }

    #[test]
    fn decode_single_param() {
        let params = Params::decode("urn:test:x?alpha=50").unwrap();
        assert_eq!(params.get("alpha"), Some("50"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn decode_multiple_params() {
        let params = Params::decode("urn:a:?alpha=50&beta=u%20worksfine").unwrap();
        assert_eq!(params.get("alpha"), Some("50"));
        assert_eq!(params.get("beta"), Some("u worksfine"));
    }

    #[test]
    fn decode_valueless_flag() {
        let params = Params::decode("urn:a:?boom").unwrap();
        assert_eq!(params.get("boom"), Some(""));
        assert!(params.contains_key("boom"));
    }

    #[test]
    fn decode_ignores_wildcard() {
        let params = Params::decode("urn:a:?alpha=50*").unwrap();
        assert_eq!(params.get("alpha"), Some("50"));

        let params = Params::decode("urn:woquo:ns:pa/procure/BalanceRecord?name=*").unwrap();
        assert_eq!(params.get("name"), Some(""));
    }

    #[test]
    fn decode_last_duplicate_wins() {
        let params = Params::decode("urn:a:?k=1&k=2").unwrap();
        assert_eq!(params.get("k"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn decode_invalid_value_fails() {
        let err = Params::decode("urn:a:?k=%E8%94").unwrap_err();
        assert_eq!(err.kind, EncodingErrorKind::InvalidUtf8);
    }

    #[test]
    fn decode_validated_matches_decode() {
        let text = "urn:a:?alpha=abccde%20%45%4Fme&b";
        assert_eq!(Params::decode_validated(text), Params::decode(text).unwrap());
    }

    #[test]
    fn encode_sorts_keys() {
        let mut params = Params::new();
        params.insert("z", "1");
        params.insert("a", "2");
        params.insert("m", "");
        assert_eq!(params.encode(), "?a=2&m&z=1");
        assert_eq!(params.to_string(), "?a=2&m&z=1");
    }

    #[test]
    fn encode_escapes_values_only() {
        let params: Params = [("bar", "\u{8514} value?")].into_iter().collect();
        assert_eq!(encode_params(&params), "?bar=%E8%94%94%20value%3F");
    }

    #[test]
    fn insert_upserts() {
        let mut params = Params::decode("urn:a:?k=1").unwrap();
        assert_eq!(params.insert("k", "2"), Some("1".to_string()));
        assert_eq!(params.get("k"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn keys_and_iter_are_sorted() {
        let params = decode_params("urn:a:?b=2&a=1").unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn decode_inverts_encode() {
        let params: Params = [("x", "ü/1"), ("y", ""), ("z", "@!$#^")].into_iter().collect();
        let text = format!("urn:test:body{}", params.encode());
        assert_eq!(Params::decode(&text).unwrap(), params);
    }
}

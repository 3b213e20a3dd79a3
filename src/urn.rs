//! Main URN type.

use std::fmt;
use std::str::FromStr;

use tracing::{Level, event};
use url::Url;

use crate::codec;
use crate::constants::{EMPTY_NID, PREFIX, QUERY_MARKER, SEPARATOR, WILDCARD};
use crate::error::{NotFoundError, SemanticError, UrnError};
use crate::grammar;
use crate::params::Params;

/// A validated Uniform Resource Name.
///
/// The canonical text is the whole state of the value: it is stored exactly
/// as given (or as built from components) and every accessor re-derives its
/// result from it. Mutators return new values.
///
/// Equality, ordering and hashing use the canonical text as-is. No
/// lexical-equivalence folding is applied, so `URN:foo:a` and `urn:foo:a`
/// are different values.
///
/// # Structure
///
/// ```text
/// urn:<nid>:<nss>[?query][*]
/// ```
///
/// # Examples
///
/// ```
/// use rfc2141::Urn;
///
/// let urn = Urn::parse("urn:jcabi:jeff%20lebowski%2540").unwrap();
/// assert_eq!(urn.nid(), "jcabi");
/// assert_eq!(urn.nss(), "jeff lebowski%40");
///
/// let urn = Urn::from_parts("test", "walter sobchak!").unwrap();
/// assert_eq!(urn.to_string(), "urn:test:walter%20sobchak%21");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Urn {
    text: String,
}

impl Urn {
    /// Parses a URN, reporting the precise reason for a rejection.
    ///
    /// # Errors
    ///
    /// - `UrnError::Syntax` if the text does not match the URN grammar
    /// - `UrnError::Semantic` if the NID is `urn`, or the empty URN has an NSS
    ///
    /// Escapes that do not decode to UTF-8 are accepted; [`nss`](Self::nss)
    /// and [`params`](Self::params) replace them with `U+FFFD`.
    pub fn parse(text: &str) -> Result<Self, UrnError> {
        grammar::validate(text)?;
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// Parses a URN, collapsing every rejection into `InvalidArgument`.
    ///
    /// # Errors
    ///
    /// Returns `UrnError::InvalidArgument` whose source is the error
    /// [`Urn::parse`] would have returned.
    pub fn create(text: &str) -> Result<Self, UrnError> {
        Self::parse(text).map_err(|e| UrnError::rejected(format!("invalid URN '{text}'"), e))
    }

    /// Builds `urn:<nid>:<nss>`, percent-encoding the NSS.
    ///
    /// # Errors
    ///
    /// Returns `UrnError::InvalidArgument` if the NID is not 1 to 31
    /// lowercase letters, is `urn`, or is `void` with a non-empty NSS.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2141::Urn;
    ///
    /// let urn = Urn::from_parts("foo", "A123,456").unwrap();
    /// assert_eq!(urn.nss(), "A123,456");
    /// assert!(Urn::from_parts("void", "anything").is_err());
    /// ```
    pub fn from_parts(nid: &str, nss: &str) -> Result<Self, UrnError> {
        let text = format!("{PREFIX}{SEPARATOR}{nid}{SEPARATOR}{}", codec::encode(nss));
        let rejected = |e| UrnError::rejected(format!("invalid NID '{nid}' or NSS '{nss}'"), e);

        grammar::check_nid(nid).map_err(|kind| {
            let e = UrnError::Semantic(SemanticError {
                input: text.clone(),
                kind,
            });
            event!(Level::DEBUG, nid, error = %e, "NID rejected");
            rejected(e)
        })?;
        grammar::validate(&text).map_err(rejected)?;

        Ok(Self { text })
    }

    /// Returns the empty URN, `urn:void:`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            text: format!("{PREFIX}{SEPARATOR}{EMPTY_NID}{SEPARATOR}"),
        }
    }

    /// Returns true if `text` is a valid URN.
    #[must_use]
    pub fn is_valid(text: &str) -> bool {
        grammar::validate(text).is_ok()
    }

    /// Returns the canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the namespace identifier.
    #[must_use]
    pub fn nid(&self) -> &str {
        grammar::segment(&self.text, 1)
    }

    /// Returns the decoded namespace-specific string.
    ///
    /// The NSS ends before the query marker; a trailing wildcard is not part
    /// of it.
    #[must_use]
    pub fn nss(&self) -> String {
        codec::decode_lossy(grammar::nss_body(&self.text))
    }

    /// Returns true for the empty URN (NID `void`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nid() == EMPTY_NID
    }

    /// Returns the decoded query parameters.
    #[must_use]
    pub fn params(&self) -> Params {
        Params::decode_validated(&self.text)
    }

    /// Returns true if the URN has a query part.
    #[must_use]
    pub fn has_params(&self) -> bool {
        self.text.contains(QUERY_MARKER)
    }

    /// Returns the decoded value of a query parameter.
    ///
    /// A parameter present without a value yields the empty string.
    ///
    /// # Errors
    ///
    /// Returns `UrnError::NotFound` with the known parameter names if `name`
    /// is absent.
    pub fn param(&self, name: &str) -> Result<String, UrnError> {
        let params = self.params();
        match params.get(name) {
            Some(value) => Ok(value.to_string()),
            None => Err(NotFoundError {
                name: name.to_string(),
                urn: self.text.clone(),
                known: params.keys().map(str::to_string).collect(),
            }
            .into()),
        }
    }

    /// Returns a new URN with the parameter set to `value`.
    ///
    /// An existing parameter is overwritten. Parameters are always written
    /// in ascending name order, so the result does not depend on the order
    /// in which parameters were added. A trailing wildcard stays at the end.
    ///
    /// # Errors
    ///
    /// Returns `UrnError::InvalidArgument` if `name` is not made of ASCII
    /// letters, digits and underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2141::Urn;
    ///
    /// let urn = Urn::parse("urn:test:x?bb").unwrap()
    ///     .with_param("crap", "v").unwrap()
    ///     .with_param("bar", "ü value?").unwrap();
    /// assert_eq!(urn.to_string(), "urn:test:x?bar=%C3%BC%20value%3F&bb&crap=v");
    /// ```
    pub fn with_param(&self, name: &str, value: impl fmt::Display) -> Result<Self, UrnError> {
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(UrnError::invalid_argument(format!(
                "param name '{name}' must be ASCII letters, digits or underscores"
            )));
        }

        let mut params = self.params();
        params.insert(name, value.to_string());

        let (body, wildcard) = match self.text.strip_suffix(WILDCARD) {
            Some(body) => (body, WILDCARD.to_string()),
            None => (self.text.as_str(), String::new()),
        };
        let base = body.split_once(QUERY_MARKER).map_or(body, |(base, _)| base);

        Self::create(&format!("{base}{params}{wildcard}"))
    }

    /// Returns the URN without its query part.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2141::Urn;
    ///
    /// let urn = Urn::parse("urn:test:something?a=9&b=4").unwrap();
    /// assert_eq!(urn.pure(), Urn::parse("urn:test:something").unwrap());
    /// ```
    #[must_use]
    pub fn pure(&self) -> Self {
        match self.text.split_once(QUERY_MARKER) {
            // Everything before the query marker is itself a valid URN.
            Some((base, _)) => Self {
                text: base.to_string(),
            },
            None => self.clone(),
        }
    }

    /// Returns true if `pattern` equals this URN, or ends with `*` and this
    /// URN starts with the rest of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2141::Urn;
    ///
    /// let urn = Urn::parse("urn:test:file").unwrap();
    /// assert!(urn.matches("urn:test:*"));
    /// assert!(urn.matches("urn:test:file"));
    /// assert!(!urn.matches("urn:test:other*"));
    /// ```
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        if self.text == pattern {
            return true;
        }
        pattern
            .strip_suffix(WILDCARD)
            .is_some_and(|prefix| self.text.starts_with(prefix))
    }

    /// Converts the URN into a generic URI.
    ///
    /// The URI parser lowercases the scheme, so `URN:hello:test` becomes
    /// `urn:hello:test`. The rest of the text is kept as is.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the URI parser rejects the text. This does
    /// not happen for URNs accepted by this crate, but the outcome belongs to
    /// the `url` crate.
    pub fn to_uri(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.text)
    }
}

impl Default for Urn {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Urn {
    type Err = UrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Urn {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl TryFrom<&str> for Urn {
    type Error = UrnError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Urn {
    type Error = UrnError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        grammar::validate(&text)?;
        Ok(Self { text })
    }
}

impl From<Urn> for String {
    fn from(urn: Urn) -> Self {
        urn.text
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Urn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Urn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

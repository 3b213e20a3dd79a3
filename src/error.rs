//! Error types for URN parsing, construction and access.

use std::error::Error;
use std::fmt;

/// Errors that can occur when working with a URN.
///
/// `Syntax` and `Semantic` are the precise kinds surfaced by
/// [`Urn::parse`](crate::Urn::parse); `Encoding` lifts a failed
/// [`decode`](crate::decode) through `?`. The permissive constructors
/// ([`Urn::create`](crate::Urn::create), [`Urn::from_parts`](crate::Urn::from_parts)
/// and [`Urn::with_param`](crate::Urn::with_param)) collapse every failure
/// into `InvalidArgument`, keeping the precise kind as its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrnError {
    /// A required input was rejected
    InvalidArgument {
        /// Human-readable description of the rejected input
        message: String,
        /// The precise failure, if there was one
        source: Option<Box<UrnError>>,
    },
    /// The text does not match the URN grammar
    Syntax(SyntaxError),
    /// The text matches the grammar but breaks a structural rule
    Semantic(SemanticError),
    /// A percent-escape could not be decoded
    Encoding(EncodingError),
    /// A requested query parameter is absent
    NotFound(NotFoundError),
}

impl UrnError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a precise failure into `InvalidArgument`.
    pub(crate) fn rejected(message: impl Into<String>, cause: Self) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }
}

impl fmt::Display for UrnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { message, source } => match source {
                Some(cause) => write!(f, "{message}: {cause}"),
                None => write!(f, "{message}"),
            },
            Self::Syntax(e) => write!(f, "{e}"),
            Self::Semantic(e) => write!(f, "{e}"),
            Self::Encoding(e) => write!(f, "{e}"),
            Self::NotFound(e) => write!(f, "{e}"),
        }
    }
}

impl Error for UrnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument { source, .. } => {
                source.as_deref().map(|e| e as &(dyn Error + 'static))
            }
            // Display already renders the wrapped error.
            Self::Syntax(_) | Self::Semantic(_) | Self::Encoding(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<SyntaxError> for UrnError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<SemanticError> for UrnError {
    fn from(e: SemanticError) -> Self {
        Self::Semantic(e)
    }
}

impl From<EncodingError> for UrnError {
    fn from(e: EncodingError) -> Self {
        Self::Encoding(e)
    }
}

impl From<NotFoundError> for UrnError {
    fn from(e: NotFoundError) -> Self {
        Self::NotFound(e)
    }
}

/// The text failed the whole-string URN grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// The text that failed to match
    pub input: String,
    /// Why it failed
    pub reason: &'static str,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid format of URN '{}': {}", self.input, self.reason)
    }
}

impl Error for SyntaxError {}

/// The text is well-formed but breaks a structural rule of RFC 2141.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    /// The rejected text
    pub input: String,
    /// The rule that was broken
    pub kind: SemanticErrorKind,
}

/// Structural rules checked after the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// NID is missing
    EmptyNid,
    /// NID exceeds the maximum length
    NidTooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// NID contains something other than lowercase letters
    InvalidNidChar {
        /// The invalid character
        char: char,
        /// Position within the NID
        position: usize,
    },
    /// NID is the reserved word `urn`
    ReservedNid,
    /// The empty URN carries an NSS
    EmptyWithNss,
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "URN '{}' rejected: ", self.input)?;
        match &self.kind {
            SemanticErrorKind::EmptyNid => write!(f, "NID cannot be empty"),
            SemanticErrorKind::NidTooLong { max, actual } => {
                write!(f, "NID length {actual} exceeds maximum {max}")
            }
            SemanticErrorKind::InvalidNidChar { char, position } => write!(
                f,
                "invalid NID character '{char}' at position {position}; only lowercase letters allowed"
            ),
            SemanticErrorKind::ReservedNid => {
                write!(f, "NID can't be 'urn' according to RFC 2141, section 2.1")
            }
            SemanticErrorKind::EmptyWithNss => write!(f, "empty URN can't have NSS"),
        }
    }
}

impl Error for SemanticError {}

/// Percent-decoding failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingError {
    /// The encoded value
    pub value: String,
    /// What went wrong
    pub kind: EncodingErrorKind,
}

/// Percent-decoding failure kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingErrorKind {
    /// `%` not followed by two hexadecimal digits
    MalformedEscape {
        /// Byte offset of the `%`
        position: usize,
    },
    /// The decoded bytes are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EncodingErrorKind::MalformedEscape { position } => write!(
                f,
                "malformed percent-escape at position {position} in '{}'",
                self.value
            ),
            EncodingErrorKind::InvalidUtf8 => {
                write!(f, "'{}' does not decode to valid UTF-8", self.value)
            }
        }
    }
}

impl Error for EncodingError {}

/// A query parameter was requested but is not present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    /// The requested parameter name
    pub name: String,
    /// The URN that was searched
    pub urn: String,
    /// Names that are present
    pub known: Vec<String>,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "param '{}' not found in '{}', among [{}]",
            self.name,
            self.urn,
            self.known.join(", ")
        )
    }
}

impl Error for NotFoundError {}

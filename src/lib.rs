//! Parser, validator and codec for RFC 2141 Uniform Resource Names.
//!
//! This crate implements parsing, validation, construction and canonical
//! rendering of URNs as defined in RFC 2141, extended with an optional query
//! suffix and a trailing wildcard marker used for pattern matching.
//!
//! # Overview
//!
//! A URN has the structure:
//!
//! ```text
//! urn:<nid>:<nss>[?name=value&flag][*]
//! ```
//!
//! The canonical text is the entire state of a [`Urn`]. It is validated once
//! on construction and every accessor re-derives its result from it.
//!
//! # Quick Start
//!
//! ```rust
//! use rfc2141::Urn;
//!
//! // Parse a URN
//! let urn = Urn::parse("urn:isbn:0451450523?edition=2").unwrap();
//! assert_eq!(urn.nid(), "isbn");
//! assert_eq!(urn.nss(), "0451450523");
//! assert_eq!(urn.param("edition").unwrap(), "2");
//!
//! // Build one from components; the NSS is percent-encoded
//! let urn = Urn::from_parts("test", "walter sobchak!").unwrap();
//! assert_eq!(urn.to_string(), "urn:test:walter%20sobchak%21");
//!
//! // Derive new values
//! let tagged = urn.with_param("page", 7).unwrap();
//! assert_eq!(tagged.to_string(), "urn:test:walter%20sobchak%21?page=7");
//! assert_eq!(tagged.pure(), urn);
//! assert!(tagged.matches("urn:test:*"));
//! ```
//!
//! # Errors
//!
//! [`Urn::parse`] reports the precise failure: [`SyntaxError`] for text that
//! does not match the grammar, [`SemanticError`] for text that breaks a
//! structural rule. [`Urn::create`] and [`Urn::from_parts`] collapse these
//! into [`UrnError::InvalidArgument`]. [`EncodingError`] comes from
//! [`decode`] and [`decode_params`] for escapes that do not decode to UTF-8;
//! URN accessors decode such escapes lossily.
//!
//! # Grammar
//!
//! | Part | Rule |
//! |------|------|
//! | Prefix | `urn`, case-insensitive |
//! | NID | 1 to 31 lowercase ASCII letters, not `urn` |
//! | NSS | letters, digits, `-`, `/`, `:` and `%XX` escapes |
//! | Query | `?name[=value]` pairs joined by `&`; names are letters, digits, `_` |
//! | Wildcard | optional trailing `*` |
//!
//! Lexical equivalence (RFC 2141 section 6) is not implemented: comparison
//! is exact on the canonical text.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod codec;
mod constants;
mod error;
pub mod grammar;
mod params;
pub mod prelude;
mod urn;

pub use codec::{ENCODE_SET, decode, encode};
pub use constants::{
    EMPTY_NID, MAX_NID_LENGTH, PARAM_SEPARATOR, PREFIX, QUERY_MARKER, SEPARATOR, VALUE_SEPARATOR,
    WILDCARD,
};
pub use error::{
    EncodingError, EncodingErrorKind, NotFoundError, SemanticError, SemanticErrorKind, SyntaxError,
    UrnError,
};
pub use params::{Params, decode_params, encode_params};
pub use url::Url;
pub use urn::Urn;

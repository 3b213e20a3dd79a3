//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use rfc2141::prelude::*;
//!
//! let urn = Urn::parse("urn:test:x?a=1").unwrap();
//! assert_eq!(urn.params().get("a"), Some("1"));
//! ```

pub use crate::{
    // Core types
    Params, Urn,
    // Errors
    EncodingError, EncodingErrorKind, NotFoundError, SemanticError, SemanticErrorKind, SyntaxError,
    UrnError,
    // Constants
    EMPTY_NID, MAX_NID_LENGTH, PREFIX, WILDCARD,
};

//! Constants for URN validation and rendering.

/// The leading token of every URN, matched case-insensitively.
pub const PREFIX: &str = "urn";

/// Separator between the prefix, the NID and the NSS.
pub const SEPARATOR: char = ':';

/// NID of the empty URN. An empty URN cannot carry an NSS.
pub const EMPTY_NID: &str = "void";

/// Maximum NID length in characters, per RFC 2141 section 2.
pub const MAX_NID_LENGTH: usize = 31;

/// Marker that starts the query part.
pub const QUERY_MARKER: char = '?';

/// Separator between query parameters.
pub const PARAM_SEPARATOR: char = '&';

/// Separator between a parameter name and its value.
pub const VALUE_SEPARATOR: char = '=';

/// Trailing marker used for prefix pattern matching.
pub const WILDCARD: char = '*';

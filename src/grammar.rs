//! Whole-string URN grammar, structural rules and segment extraction.
//!
//! Validation runs in two stages. The grammar is a single regular
//! expression over the entire text. The structural rules then re-extract the
//! NID and check it against RFC 2141. Escapes are only checked for shape
//! here; whether they decode to UTF-8 is left to the accessors, which decode
//! lossily.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{Level, event};

use crate::codec;
use crate::constants::{EMPTY_NID, MAX_NID_LENGTH, PREFIX, QUERY_MARKER, SEPARATOR, WILDCARD};
use crate::error::{SemanticError, SemanticErrorKind, SyntaxError, UrnError};

/// `urn:<nid>(:<nss>)+(?<query>)?*?`, case-insensitive on `urn` only.
const PATTERN: &str = concat!(
    r"^(?i:urn):[a-z]{1,31}",
    r"(?::(?:[\-a-zA-Z0-9/]|%[0-9a-fA-F]{2})*)+",
    r"(?:\?[A-Za-z0-9_]+(?:=(?:[\-a-zA-Z0-9/]|%[0-9a-fA-F]{2})*)?",
    r"(?:&[A-Za-z0-9_]+(?:=(?:[\-a-zA-Z0-9/]|%[0-9a-fA-F]{2})*)?)*)?",
    r"\*?$",
);

static GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATTERN).expect("URN grammar is a valid regular expression"));

/// Returns true if `text` matches the whole-string URN grammar.
///
/// This is the grammar alone; see [`validate`] for the full check.
///
/// # Examples
///
/// ```
/// use rfc2141::grammar::is_syntactically_valid;
///
/// assert!(is_syntactically_valid("URN:hello:test"));
/// assert!(is_syntactically_valid("urn:a:?alpha=50*"));
/// assert!(!is_syntactically_valid("urn:test:spaces are not allowed here"));
/// ```
#[must_use]
pub fn is_syntactically_valid(text: &str) -> bool {
    GRAMMAR.is_match(text)
}

/// Runs the grammar and the structural rules.
///
/// # Errors
///
/// - `UrnError::Syntax` if the text does not match the grammar
/// - `UrnError::Semantic` if the NID breaks RFC 2141 or the empty URN has an NSS
pub fn validate(text: &str) -> Result<(), UrnError> {
    check(text).inspect_err(|e| {
        event!(Level::DEBUG, urn = text, error = %e, "URN rejected");
    })
}

fn check(text: &str) -> Result<(), UrnError> {
    if !is_syntactically_valid(text) {
        return Err(SyntaxError {
            input: text.to_string(),
            reason: diagnose(text),
        }
        .into());
    }
    validate_semantics(text)?;
    Ok(())
}

/// Checks the NID and the empty-URN rule.
///
/// Works on any text with at least a prefix and a NID segment, so it can
/// report a precise rule even where the grammar has already failed.
///
/// # Errors
///
/// Returns `SemanticError` if the NID is empty, longer than 31 characters,
/// contains anything but lowercase letters, equals `urn`, or if the empty
/// URN (`void`) carries an NSS.
///
/// # Examples
///
/// ```
/// use rfc2141::grammar::validate_semantics;
/// use rfc2141::SemanticErrorKind;
///
/// let err = validate_semantics("urn:void:should-fail").unwrap_err();
/// assert_eq!(err.kind, SemanticErrorKind::EmptyWithNss);
/// ```
pub fn validate_semantics(text: &str) -> Result<(), SemanticError> {
    let nid = segment(text, 1);
    let reject = |kind| SemanticError {
        input: text.to_string(),
        kind,
    };

    check_nid(nid).map_err(reject)?;

    if nid == EMPTY_NID && !codec::decode_lossy(nss_body(text)).is_empty() {
        return Err(reject(SemanticErrorKind::EmptyWithNss));
    }

    Ok(())
}

/// Checks a bare NID: 1 to 31 lowercase letters, never `urn`.
pub(crate) fn check_nid(nid: &str) -> Result<(), SemanticErrorKind> {
    if nid.is_empty() {
        return Err(SemanticErrorKind::EmptyNid);
    }

    let len = nid.chars().count();
    if len > MAX_NID_LENGTH {
        return Err(SemanticErrorKind::NidTooLong {
            max: MAX_NID_LENGTH,
            actual: len,
        });
    }

    if let Some((position, char)) = nid.chars().enumerate().find(|(_, c)| !c.is_ascii_lowercase()) {
        return Err(SemanticErrorKind::InvalidNidChar { char, position });
    }

    if nid.eq_ignore_ascii_case(PREFIX) {
        return Err(SemanticErrorKind::ReservedNid);
    }

    Ok(())
}

/// Returns segment `index` of `text` split on `:` into at most three parts.
///
/// Index 0 is the prefix, 1 the NID, and 2 everything after the second colon
/// (NSS, query and wildcard, verbatim). Missing segments are empty.
///
/// # Examples
///
/// ```
/// use rfc2141::grammar::segment;
///
/// assert_eq!(segment("urn:a:b:c?x=1", 1), "a");
/// assert_eq!(segment("urn:a:b:c?x=1", 2), "b:c?x=1");
/// assert_eq!(segment("urn:a:", 2), "");
/// ```
#[must_use]
pub fn segment(text: &str, index: usize) -> &str {
    text.splitn(3, SEPARATOR).nth(index).unwrap_or_default()
}

/// The encoded NSS: segment 2 up to the query marker, without the wildcard.
pub(crate) fn nss_body(text: &str) -> &str {
    let tail = segment(text, 2);
    let body = tail.split_once(QUERY_MARKER).map_or(tail, |(body, _)| body);
    body.strip_suffix(WILDCARD).unwrap_or(body)
}

fn diagnose(text: &str) -> &'static str {
    if !text.is_ascii() {
        return "non-ASCII characters must be percent-encoded";
    }
    if text.contains(|c: char| c.is_ascii_whitespace()) {
        return "whitespace is not allowed";
    }

    let mut parts = text.splitn(3, SEPARATOR);
    if !parts.next().is_some_and(|prefix| prefix.eq_ignore_ascii_case(PREFIX)) {
        return "must start with 'urn:'";
    }
    let nid = parts.next().unwrap_or_default();
    if nid.is_empty() {
        return "NID is missing";
    }
    let Some(tail) = parts.next() else {
        return "missing ':' after NID";
    };
    if nid.len() > MAX_NID_LENGTH || !nid.bytes().all(|b| b.is_ascii_lowercase()) {
        return "NID must be 1 to 31 lowercase letters";
    }
    if tail.matches(QUERY_MARKER).count() > 1 {
        return "query marker '?' may appear only once";
    }
    "NSS or query contains characters that must be percent-encoded"
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn accepts_reference_corpus() {
        let texts = [
            "URN:hello:test",
            "urn:foo:some%20text%20with%20spaces",
            "urn:a:",
            "urn:a:?alpha=50",
            "urn:a:?boom",
            "urn:a:test?123",
            "urn:a:test?1a2b3c",
            "urn:a:test?1A2B3C",
            "urn:a:?alpha=abccde%20%45%4Fme",
            "urn:woquo:ns:pa/procure/BalanceRecord?name=*",
            "urn:a:?alpha=50&beta=u%20worksfine",
            "urn:verylongnamespaceid:",
            "urn:a:?alpha=50*",
            "urn:a:b/c/d",
            "urn:multiple:colon:urn:1234",
        ];
        for text in texts {
            assert!(validate(text).is_ok(), "{text} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_text() {
        let texts = [
            "abc",
            "",
            "urn::",
            "urn:incorrect namespace name with spaces:test",
            "urn:abc+foo:test-me",
            "urn:test:?abc?",
            "urn:test:?abc=incorrect*value",
            "urn:test:?abc=invalid-symbols:^%$#&@*()!-in-argument-value",
            "urn:incorrect%20namespace:",
            "urn:verylongnameofanamespaceverylongnameofanamespace:",
            "urn:test:spaces are not allowed here",
            "urn:test:unicode-has-to-be-encoded:\u{8514}",
            "urn:with-dash-nid:1234",
            "urn:Upper:1234",
            "urn:a",
        ];
        for text in texts {
            assert!(
                matches!(validate(text), Err(UrnError::Syntax(_))),
                "{text} should be a syntax error"
            );
        }
    }

    #[test]
    fn reserved_nid_is_semantic_error() {
        let err = validate("urn:urn:hello").unwrap_err();
        assert!(matches!(
            err,
            UrnError::Semantic(SemanticError {
                kind: SemanticErrorKind::ReservedNid,
                ..
            })
        ));
    }

    #[test]
    fn empty_urn_with_nss_is_semantic_error() {
        let err = validate("urn:void:it-is-impossible-to-have-any-NSS-here").unwrap_err();
        assert!(matches!(
            err,
            UrnError::Semantic(SemanticError {
                kind: SemanticErrorKind::EmptyWithNss,
                ..
            })
        ));
        assert!(validate("urn:void:").is_ok());
        assert!(validate("urn:void:?a=1").is_ok());
    }

    #[test]
    fn accepts_escapes_that_are_not_utf8() {
        for text in ["urn:test:%FF", "urn:test:%C3%28", "urn:test:x?a=%C3", "urn:a:?x=%C3"] {
            assert!(is_syntactically_valid(text), "{text}");
            assert!(validate(text).is_ok(), "{text}");
        }
    }

    #[test]
    fn semantics_report_long_nid() {
        let text = format!("urn:{}:", "a".repeat(50));
        let err = validate_semantics(&text).unwrap_err();
        assert_eq!(err.kind, SemanticErrorKind::NidTooLong { max: 31, actual: 50 });
    }

    #[test]
    fn semantics_report_bad_nid_char() {
        let err = validate_semantics("urn:ab-c:x").unwrap_err();
        assert_eq!(
            err.kind,
            SemanticErrorKind::InvalidNidChar {
                char: '-',
                position: 2
            }
        );
    }

    #[test]
    fn semantics_report_empty_nid() {
        let err = validate_semantics("urn::x").unwrap_err();
        assert_eq!(err.kind, SemanticErrorKind::EmptyNid);
    }

    #[test]
    fn check_nid_accepts_lowercase_letters() {
        assert!(check_nid("jcabi").is_ok());
        assert!(check_nid(&"z".repeat(31)).is_ok());
        assert_eq!(
            check_nid("invalid:nid"),
            Err(SemanticErrorKind::InvalidNidChar {
                char: ':',
                position: 7
            })
        );
        assert_eq!(check_nid("urn"), Err(SemanticErrorKind::ReservedNid));
    }

    #[test]
    fn segment_preserves_colons_in_tail() {
        assert_eq!(segment("urn:multiple:colon:urn:1234", 0), "urn");
        assert_eq!(segment("urn:multiple:colon:urn:1234", 1), "multiple");
        assert_eq!(segment("urn:multiple:colon:urn:1234", 2), "colon:urn:1234");
    }

    #[test]
    fn segment_out_of_range_is_empty() {
        assert_eq!(segment("urn", 1), "");
        assert_eq!(segment("urn:a", 2), "");
    }

    #[test]
    fn nss_body_strips_query_and_wildcard() {
        assert_eq!(nss_body("urn:a:b:c?x=1&y"), "b:c");
        assert_eq!(nss_body("urn:a:b*"), "b");
        assert_eq!(nss_body("urn:a:b?x=1*"), "b");
        assert_eq!(nss_body("urn:a:"), "");
    }

    #[test]
    fn syntax_error_explains_reason() {
        let reason = |text| match validate(text) {
            Err(UrnError::Syntax(e)) => e.reason,
            other => panic!("expected syntax error for {text}, got {other:?}"),
        };
        assert_eq!(reason("abc"), "must start with 'urn:'");
        assert_eq!(reason("urn:test:a b"), "whitespace is not allowed");
        assert_eq!(reason("urn:test:\u{8514}"), "non-ASCII characters must be percent-encoded");
        assert_eq!(reason("urn::"), "NID is missing");
        assert_eq!(reason("urn:a"), "missing ':' after NID");
        assert_eq!(reason("urn:abc+foo:x"), "NID must be 1 to 31 lowercase letters");
        assert_eq!(reason("urn:test:?abc?"), "query marker '?' may appear only once");
    }

    #[test]
    #[traced_test]
    fn rejection_is_logged() {
        assert!(validate("urn:test:no spaces").is_err());
        assert!(logs_contain("URN rejected"));
    }
}

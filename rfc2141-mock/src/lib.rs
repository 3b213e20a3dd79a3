//! Random URN fixtures for tests.
//!
//! [`UrnMocker`] produces fresh [`Urn`] values with a fixed namespace and a
//! random UUID as the namespace-specific string, so two mocks never collide.
//!
//! ```rust
//! use rfc2141_mock::UrnMocker;
//!
//! let urn = UrnMocker::new().with_nid("order").mock().unwrap();
//! assert_eq!(urn.nid(), "order");
//! assert_eq!(urn.nss().len(), 36);
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use rfc2141::{Urn, UrnError};
use uuid::Uuid;

/// Namespace used when none is configured.
pub const DEFAULT_NID: &str = "test";

/// Builder for random test URNs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrnMocker {
    nid: String,
    nss: String,
}

impl UrnMocker {
    /// Creates a mocker with the `test` namespace and a random NSS.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nid: DEFAULT_NID.to_string(),
            nss: Uuid::new_v4().to_string(),
        }
    }

    /// Replaces the namespace identifier.
    #[must_use]
    pub fn with_nid(mut self, nid: impl Into<String>) -> Self {
        self.nid = nid.into();
        self
    }

    /// Replaces the raw namespace-specific string. It is encoded by [`mock`](Self::mock).
    #[must_use]
    pub fn with_nss(mut self, nss: impl Into<String>) -> Self {
        self.nss = nss.into();
        self
    }

    /// Builds the URN.
    ///
    /// # Errors
    ///
    /// Returns [`UrnError::InvalidArgument`] if the configured NID is not a
    /// valid namespace identifier.
    pub fn mock(&self) -> Result<Urn, UrnError> {
        Urn::from_parts(&self.nid, &self.nss)
    }
}

impl Default for UrnMocker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mocks_are_distinct() {
        let first = UrnMocker::new().mock().unwrap();
        let second = UrnMocker::new().mock().unwrap();
        assert_ne!(first, second);
        assert_eq!(first.nid(), DEFAULT_NID);
    }

    #[test]
    fn nss_is_a_uuid() {
        let urn = UrnMocker::default().mock().unwrap();
        assert!(Uuid::parse_str(&urn.nss()).is_ok());
    }

    #[test]
    fn with_nid_and_nss() {
        let urn = UrnMocker::new()
            .with_nid("jeff")
            .with_nss("walter sobchak")
            .mock()
            .unwrap();
        assert_eq!(urn.to_string(), "urn:jeff:walter%20sobchak");
        assert_eq!(urn.nss(), "walter sobchak");
    }

    #[test]
    fn invalid_nid_is_rejected() {
        let result = UrnMocker::new().with_nid("Not-Valid").mock();
        assert!(matches!(result, Err(UrnError::InvalidArgument { .. })));
    }
}

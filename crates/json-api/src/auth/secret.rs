//! Shared secret held in memory for request authentication.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use zeroize::Zeroizing;

/// Deployment-wide secret expected from every protected request.
///
/// The value is wiped from memory on drop and never printed.
#[derive(Clone)]
pub(crate) struct SharedSecret(Zeroizing<String>);

impl SharedSecret {
    pub(crate) fn new(secret: String) -> Self {
        Self(Zeroizing::new(secret))
    }

    /// Compare a presented key without short-circuiting on the first
    /// mismatched byte.
    pub(crate) fn matches(&self, presented: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = presented.as_bytes();

        if expected.len() != presented.len() {
            return false;
        }

        expected
            .iter()
            .zip(presented)
            .fold(0_u8, |diff, (left, right)| diff | (left ^ right))
            == 0
    }
}

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SharedSecret(<redacted>)")
    }
}

//! Purchases service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PurchasesServiceError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid data")]
    InvalidData,

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),
}

impl From<Error> for PurchasesServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::StoreUnavailable(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_are_store_unavailable() {
        let error = PurchasesServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, PurchasesServiceError::StoreUnavailable(_)),
            "expected StoreUnavailable, got {error:?}"
        );
    }
}

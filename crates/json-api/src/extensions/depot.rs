//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::{Depot, StatusError};

use crate::state::State;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Shared server state injected at the root router.
    fn state_or_500(&self) -> Result<Arc<State>, StatusError> {
        self.obtain_or_500::<Arc<State>>().map(Arc::clone)
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_state_maps_to_500() {
        let depot = Depot::new();

        let error = depot.state_or_500().err();

        assert_eq!(
            error.map(|error| error.code),
            Some(salvo::http::StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}

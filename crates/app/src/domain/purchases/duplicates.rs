//! Duplicate checking for grants.

use std::sync::Arc;

use tracing::debug;

use crate::domain::purchases::{
    data::{NewPurchase, require},
    errors::PurchasesServiceError,
    records::Decision,
    store::PurchaseStore,
};

/// Grants a product to a receiver at most once.
#[derive(Clone)]
pub struct DuplicateChecker {
    store: Arc<dyn PurchaseStore>,
}

impl DuplicateChecker {
    #[must_use]
    pub fn new(store: Arc<dyn PurchaseStore>) -> Self {
        Self { store }
    }

    /// Insert a record for `grant.buyer` unless one already exists for the product.
    ///
    /// Known duplicates are answered from a read, so the vendor may be blank
    /// for them; otherwise the store's atomic conditional insert settles any
    /// race between concurrent callers.
    ///
    /// # Errors
    ///
    /// Returns [`PurchasesServiceError::MissingField`] for an empty receiver or
    /// product, or an empty vendor when a record has to be written, and
    /// [`PurchasesServiceError::StoreUnavailable`] when the store fails.
    pub async fn check_and_maybe_insert(
        &self,
        grant: NewPurchase,
    ) -> Result<Decision, PurchasesServiceError> {
        require("buyer", &grant.buyer)?;
        require("product", &grant.product)?;

        if self.store.exists_for(&grant.buyer, &grant.product).await? {
            debug!(receiver = %grant.buyer, product = %grant.product, "grant already recorded");

            return Ok(Decision::Duplicate);
        }

        grant.validate()?;

        self.store.insert_if_absent(grant).await
    }
}

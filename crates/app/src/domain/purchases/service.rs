//! Purchases service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::purchases::{
    data::{NewPurchase, Page, PurchaseFilter, require},
    duplicates::DuplicateChecker,
    errors::PurchasesServiceError,
    records::{Decision, PurchaseRecord},
    store::PurchaseStore,
};

#[derive(Clone)]
pub struct StorePurchasesService {
    store: Arc<dyn PurchaseStore>,
    duplicates: DuplicateChecker,
}

impl StorePurchasesService {
    #[must_use]
    pub fn new(store: Arc<dyn PurchaseStore>) -> Self {
        Self {
            duplicates: DuplicateChecker::new(Arc::clone(&store)),
            store,
        }
    }
}

#[async_trait]
impl PurchasesService for StorePurchasesService {
    async fn submit_purchase(
        &self,
        purchase: NewPurchase,
    ) -> Result<PurchaseRecord, PurchasesServiceError> {
        let record = self.store.insert(purchase).await?;

        info!(
            purchase_uuid = %record.uuid,
            buyer = %record.buyer,
            product = %record.product,
            vendor = %record.vendor,
            "recorded purchase"
        );

        Ok(record)
    }

    async fn check_and_maybe_insert(
        &self,
        grant: NewPurchase,
    ) -> Result<Decision, PurchasesServiceError> {
        let receiver = grant.buyer.clone();
        let product = grant.product.clone();

        let decision = self.duplicates.check_and_maybe_insert(grant).await?;

        info!(%receiver, %product, decision = decision.as_str(), "checked grant");

        Ok(decision)
    }

    async fn list_purchases(
        &self,
        buyer: String,
        filter: PurchaseFilter,
        page: Page,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError> {
        require("buyer", &buyer)?;

        self.store.list_by_buyer(&buyer, &filter, page).await
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Record a purchase reported by a vendor.
    async fn submit_purchase(
        &self,
        purchase: NewPurchase,
    ) -> Result<PurchaseRecord, PurchasesServiceError>;

    /// Grant a product unless the receiver already holds it.
    async fn check_and_maybe_insert(
        &self,
        grant: NewPurchase,
    ) -> Result<Decision, PurchasesServiceError>;

    /// A buyer's purchases, most recent first.
    async fn list_purchases(
        &self,
        buyer: String,
        filter: PurchaseFilter,
        page: Page,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError>;
}

//! Purchase record stores.
//!
//! Two persistence shapes satisfy the same contract: a relational table
//! ([`PgPurchaseStore`]) and a per-buyer newest-first list held in memory
//! ([`MemoryPurchaseStore`]).

use async_trait::async_trait;
use mockall::automock;

use crate::domain::purchases::{
    data::{NewPurchase, Page, PurchaseFilter},
    errors::PurchasesServiceError,
    records::{Decision, PurchaseRecord},
};

mod memory;
mod postgres;

pub use memory::MemoryPurchaseStore;
pub use postgres::PgPurchaseStore;

#[automock]
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Append a new record stamped with the current time.
    async fn insert(&self, purchase: NewPurchase) -> Result<PurchaseRecord, PurchasesServiceError>;

    /// Records for `buyer`, most recent first.
    async fn list_by_buyer(
        &self,
        buyer: &str,
        filter: &PurchaseFilter,
        page: Page,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError>;

    /// Whether any record exists for the (buyer, product) pair, regardless of vendor.
    async fn exists_for(&self, buyer: &str, product: &str) -> Result<bool, PurchasesServiceError>;

    /// Insert only when no record exists for the (buyer, product) pair.
    ///
    /// The check and the write are atomic with respect to concurrent calls for
    /// the same pair.
    async fn insert_if_absent(
        &self,
        purchase: NewPurchase,
    ) -> Result<Decision, PurchasesServiceError>;
}

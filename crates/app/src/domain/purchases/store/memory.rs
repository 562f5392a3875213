//! In-memory purchase store.
//!
//! Each buyer owns a list with the newest record at the front. Appends are
//! O(1); reads scan the buyer's list, filtering and paging as they go.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::purchases::{
    data::{NewPurchase, Page, PurchaseFilter},
    errors::PurchasesServiceError,
    records::{Decision, PurchaseRecord, PurchaseUuid},
    store::PurchaseStore,
};

type BuyerLists = HashMap<String, VecDeque<PurchaseRecord>>;

#[derive(Debug, Clone, Default)]
pub struct MemoryPurchaseStore {
    lists: Arc<RwLock<BuyerLists>>,
}

impl MemoryPurchaseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn prepend(lists: &mut BuyerLists, purchase: NewPurchase) -> PurchaseRecord {
        let record = PurchaseRecord {
            uuid: PurchaseUuid::new(),
            buyer: purchase.buyer,
            product: purchase.product,
            vendor: purchase.vendor,
            created_at: Timestamp::now(),
        };

        lists
            .entry(record.buyer.clone())
            .or_default()
            .push_front(record.clone());

        record
    }

    fn contains(lists: &BuyerLists, buyer: &str, product: &str) -> bool {
        lists
            .get(buyer)
            .is_some_and(|list| list.iter().any(|record| record.product == product))
    }
}

#[async_trait]
impl PurchaseStore for MemoryPurchaseStore {
    async fn insert(&self, purchase: NewPurchase) -> Result<PurchaseRecord, PurchasesServiceError> {
        purchase.validate()?;

        let mut lists = self.lists.write().await;

        Ok(Self::prepend(&mut lists, purchase))
    }

    async fn list_by_buyer(
        &self,
        buyer: &str,
        filter: &PurchaseFilter,
        page: Page,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError> {
        let lists = self.lists.read().await;

        let Some(list) = lists.get(buyer) else {
            return Ok(Vec::new());
        };

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.per_page()).unwrap_or(usize::MAX);

        Ok(list
            .iter()
            .filter(|record| filter.matches(&record.product, &record.vendor))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn exists_for(&self, buyer: &str, product: &str) -> Result<bool, PurchasesServiceError> {
        let lists = self.lists.read().await;

        Ok(Self::contains(&lists, buyer, product))
    }

    async fn insert_if_absent(
        &self,
        purchase: NewPurchase,
    ) -> Result<Decision, PurchasesServiceError> {
        purchase.validate()?;

        // Holding the write guard across the check makes check-then-insert atomic.
        let mut lists = self.lists.write().await;

        if Self::contains(&lists, &purchase.buyer, &purchase.product) {
            return Ok(Decision::Duplicate);
        }

        Self::prepend(&mut lists, purchase);

        Ok(Decision::Inserted)
    }
}

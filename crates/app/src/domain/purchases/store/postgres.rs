//! `PostgreSQL` purchase store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};
use tracing::debug;

use crate::domain::purchases::{
    data::{NewPurchase, Page, PurchaseFilter},
    errors::PurchasesServiceError,
    records::{Decision, PurchaseRecord, PurchaseUuid},
    store::PurchaseStore,
};

const INSERT_PURCHASE_SQL: &str = include_str!("sql/insert_purchase.sql");
const LIST_PURCHASES_BY_BUYER_SQL: &str = include_str!("sql/list_purchases_by_buyer.sql");
const PURCHASE_EXISTS_SQL: &str = include_str!("sql/purchase_exists.sql");
const LOCK_BUYER_PRODUCT_SQL: &str = include_str!("sql/lock_buyer_product.sql");

#[derive(Debug, Clone)]
pub struct PgPurchaseStore {
    pool: PgPool,
}

impl PgPurchaseStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_in(
        tx: &mut Transaction<'_, Postgres>,
        purchase: &NewPurchase,
    ) -> Result<PurchaseRecord, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(INSERT_PURCHASE_SQL)
            .bind(PurchaseUuid::new().into_uuid())
            .bind(&purchase.buyer)
            .bind(&purchase.product)
            .bind(&purchase.vendor)
            .fetch_one(&mut **tx)
            .await
    }

    async fn exists_in(
        tx: &mut Transaction<'_, Postgres>,
        buyer: &str,
        product: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(PURCHASE_EXISTS_SQL)
            .bind(buyer)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PurchaseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PurchaseUuid::from_uuid(row.try_get("uuid")?),
            buyer: row.try_get("buyer")?,
            product: row.try_get("product")?,
            vendor: row.try_get("vendor")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

#[async_trait]
impl PurchaseStore for PgPurchaseStore {
    async fn insert(&self, purchase: NewPurchase) -> Result<PurchaseRecord, PurchasesServiceError> {
        purchase.validate()?;

        let mut tx = self.pool.begin().await?;

        let record = Self::insert_in(&mut tx, &purchase).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_by_buyer(
        &self,
        buyer: &str,
        filter: &PurchaseFilter,
        page: Page,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError> {
        let offset = i64::try_from(page.offset()).map_err(|_overflow| {
            PurchasesServiceError::InvalidData
        })?;

        query_as::<Postgres, PurchaseRecord>(LIST_PURCHASES_BY_BUYER_SQL)
            .bind(buyer)
            .bind(filter.product.as_deref())
            .bind(filter.vendor.as_deref())
            .bind(i64::from(page.per_page()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn exists_for(&self, buyer: &str, product: &str) -> Result<bool, PurchasesServiceError> {
        query_scalar::<Postgres, bool>(PURCHASE_EXISTS_SQL)
            .bind(buyer)
            .bind(product)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert_if_absent(
        &self,
        purchase: NewPurchase,
    ) -> Result<Decision, PurchasesServiceError> {
        purchase.validate()?;

        let mut tx = self.pool.begin().await?;

        // Serializes concurrent checks for the same pair until commit.
        query(LOCK_BUYER_PRODUCT_SQL)
            .bind(&purchase.buyer)
            .bind(&purchase.product)
            .execute(&mut *tx)
            .await?;

        if Self::exists_in(&mut tx, &purchase.buyer, &purchase.product).await? {
            tx.commit().await?;

            debug!(buyer = %purchase.buyer, product = %purchase.product, "duplicate purchase");

            return Ok(Decision::Duplicate);
        }

        Self::insert_in(&mut tx, &purchase).await?;

        tx.commit().await?;

        Ok(Decision::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    fn purchase(buyer: &str, product: &str, vendor: &str) -> NewPurchase {
        NewPurchase {
            buyer: buyer.to_string(),
            product: product.to_string(),
            vendor: vendor.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_list_returns_newest_first() -> TestResult {
        let db = TestDb::new().await;
        let store = PgPurchaseStore::new(db.pool().clone());

        let first = store.insert(purchase("avatar", "hat", "shop")).await?;
        let second = store.insert(purchase("avatar", "boots", "shop")).await?;

        let records = store
            .list_by_buyer("avatar", &PurchaseFilter::default(), Page::default())
            .await?;

        assert_eq!(records, vec![second, first]);

        Ok(())
    }

    #[tokio::test]
    async fn list_applies_filters_and_paging() -> TestResult {
        let db = TestDb::new().await;
        let store = PgPurchaseStore::new(db.pool().clone());

        for vendor in ["a", "b", "c"] {
            store.insert(purchase("avatar", "hat", vendor)).await?;
        }

        store.insert(purchase("avatar", "boots", "a")).await?;

        let hats = store
            .list_by_buyer(
                "avatar",
                &PurchaseFilter {
                    product: Some("hat".to_string()),
                    vendor: None,
                },
                Page::new(Some(2), Some(2)),
            )
            .await?;

        assert_eq!(hats.len(), 1, "second page should hold the oldest hat");
        assert_eq!(hats.first().map(|r| r.vendor.as_str()), Some("a"));

        Ok(())
    }

    #[tokio::test]
    async fn list_for_unknown_buyer_is_empty() -> TestResult {
        let db = TestDb::new().await;
        let store = PgPurchaseStore::new(db.pool().clone());

        let records = store
            .list_by_buyer("nobody", &PurchaseFilter::default(), Page::default())
            .await?;

        assert!(records.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn insert_if_absent_inserts_once() -> TestResult {
        let db = TestDb::new().await;
        let store = PgPurchaseStore::new(db.pool().clone());

        let first = store.insert_if_absent(purchase("avatar", "hat", "a")).await?;
        let second = store.insert_if_absent(purchase("avatar", "hat", "b")).await?;

        assert_eq!(first, Decision::Inserted);
        assert_eq!(second, Decision::Duplicate);
        assert!(store.exists_for("avatar", "hat").await?);

        let records = store
            .list_by_buyer("avatar", &PurchaseFilter::default(), Page::default())
            .await?;

        assert_eq!(records.len(), 1, "exactly one record for the pair");

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_insert_if_absent_inserts_once() -> TestResult {
        let db = TestDb::new().await;
        let store = PgPurchaseStore::new(db.pool().clone());

        let (left, right) = tokio::join!(
            store.insert_if_absent(purchase("avatar", "hat", "a")),
            store.insert_if_absent(purchase("avatar", "hat", "b")),
        );

        let inserted = [left?, right?]
            .into_iter()
            .filter(|decision| *decision == Decision::Inserted)
            .count();

        assert_eq!(inserted, 1, "only one concurrent call may insert");

        Ok(())
    }

    #[tokio::test]
    async fn insert_rejects_empty_vendor() {
        let db = TestDb::new().await;
        let store = PgPurchaseStore::new(db.pool().clone());

        let result = store.insert(purchase("avatar", "hat", "")).await;

        assert!(
            matches!(result, Err(PurchasesServiceError::MissingField("vendor"))),
            "expected MissingField(vendor), got {result:?}"
        );
    }

    #[tokio::test]
    async fn blank_identifier_violates_check_constraint() -> TestResult {
        let db = TestDb::new().await;
        let mut tx = db.pool().begin().await?;

        let result = PgPurchaseStore::insert_in(&mut tx, &purchase("   ", "hat", "shop"))
            .await
            .map_err(PurchasesServiceError::from);

        assert!(
            matches!(result, Err(PurchasesServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }
}

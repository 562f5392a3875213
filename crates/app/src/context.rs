//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database,
    domain::purchases::{
        PurchasesService, StorePurchasesService,
        store::{MemoryPurchaseStore, PgPurchaseStore, PurchaseStore},
    },
};

/// Persistence shape backing the purchase store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreBackend {
    /// Relational `purchases` table.
    Postgres,

    /// Per-buyer lists held in process memory; contents are lost on exit.
    Memory,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("a database url is required for the postgres store")]
    MissingDatabaseUrl,

    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to prepare database schema")]
    Schema(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub purchases: Arc<dyn PurchasesService>,
}

impl AppContext {
    /// Build application context for the configured store backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the postgres backend has no database URL, or when
    /// connecting or preparing the schema fails.
    pub async fn from_backend(
        backend: StoreBackend,
        database_url: Option<&str>,
    ) -> Result<Self, AppInitError> {
        match backend {
            StoreBackend::Postgres => {
                let url = database_url.ok_or(AppInitError::MissingDatabaseUrl)?;

                Self::from_database_url(url).await
            }
            StoreBackend::Memory => {
                info!("using in-memory purchase store");

                Ok(Self::in_memory())
            }
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or preparing
    /// the schema fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_schema(&pool)
            .await
            .map_err(AppInitError::Schema)?;

        Ok(Self::from_store(Arc::new(PgPurchaseStore::new(pool))))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryPurchaseStore::new()))
    }

    #[must_use]
    pub fn from_store(store: Arc<dyn PurchaseStore>) -> Self {
        Self {
            purchases: Arc::new(StorePurchasesService::new(store)),
        }
    }
}

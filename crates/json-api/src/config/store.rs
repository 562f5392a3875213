//! Store Config

use clap::Args;
use purchases_app::context::StoreBackend;

/// Purchase store settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Store backend (postgres, memory)
    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Postgres)]
    pub store_backend: StoreBackend,

    /// `PostgreSQL` connection string, required by the postgres backend
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    output::OutputConfig,
    server::ServerRuntimeConfig,
    store::StoreConfig,
};

pub(crate) mod auth;
pub(crate) mod observability;
pub(crate) mod output;
pub(crate) mod server;
pub(crate) mod store;

/// Purchase Ledger JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "purchases-json", about = "Purchase Ledger API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging and metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Purchase store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Shared-secret settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Response body settings.
    #[command(flatten)]
    pub output: OutputConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed or a required value is missing
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

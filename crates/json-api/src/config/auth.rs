//! Auth Config

use clap::{Args, builder::NonEmptyStringValueParser};

use crate::auth::SharedSecret;

/// Shared-secret settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Shared secret expected in the `x-api-key` header
    #[arg(
        long,
        env = "API_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    api_key: String,
}

impl AuthConfig {
    /// The configured secret, moved into a zeroizing holder.
    #[must_use]
    pub(crate) fn shared_secret(&self) -> SharedSecret {
        SharedSecret::new(self.api_key.clone())
    }
}

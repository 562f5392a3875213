//! Authentication

pub(crate) mod middleware;
mod secret;

pub(crate) use secret::SharedSecret;

/// Header carrying the deployment's shared secret.
pub(crate) const API_KEY_HEADER: &str = "x-api-key";

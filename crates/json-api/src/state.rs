//! State

use std::sync::Arc;

use purchases_app::{context::AppContext, domain::purchases::format::PurchaseFormatter};

use crate::{
    auth::SharedSecret,
    config::{ServerConfig, output::ResponseFormat},
};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) secret: SharedSecret,
    pub(crate) response_format: ResponseFormat,
    pub(crate) formatter: PurchaseFormatter,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        app: AppContext,
        secret: SharedSecret,
        response_format: ResponseFormat,
        formatter: PurchaseFormatter,
    ) -> Self {
        Self {
            app,
            secret,
            response_format,
            formatter,
        }
    }

    #[must_use]
    pub(crate) fn from_config(app: AppContext, config: &ServerConfig) -> Arc<Self> {
        Arc::new(Self::new(
            app,
            config.auth.shared_secret(),
            config.output.response_format,
            config.output.formatter(),
        ))
    }
}

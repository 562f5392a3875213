//! Output Config

use clap::Args;
use purchases_app::domain::purchases::format::{
    DEFAULT_FIELD_DELIMITER, DEFAULT_RECORD_DELIMITER, PurchaseFormatter,
};

/// Response body shape, fixed per deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ResponseFormat {
    /// Plain text bodies for scripting clients.
    Text,

    /// JSON bodies.
    Json,
}

/// Response body settings.
#[derive(Debug, Args)]
pub struct OutputConfig {
    /// Response format (text, json)
    #[arg(long, env = "RESPONSE_FORMAT", value_enum, default_value_t = ResponseFormat::Text)]
    pub response_format: ResponseFormat,

    /// Separator between records in purchase lists
    #[arg(long, env = "RECORD_DELIMITER", default_value = DEFAULT_RECORD_DELIMITER)]
    pub record_delimiter: String,

    /// Separator between product and vendor in purchase lists
    #[arg(long, env = "FIELD_DELIMITER", default_value = DEFAULT_FIELD_DELIMITER)]
    pub field_delimiter: String,
}

impl OutputConfig {
    #[must_use]
    pub fn formatter(&self) -> PurchaseFormatter {
        PurchaseFormatter::new(self.record_delimiter.clone(), self.field_delimiter.clone())
    }
}

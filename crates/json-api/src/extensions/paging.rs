//! Query string helpers for list endpoints.

use salvo::prelude::{Request, StatusError};

use crate::extensions::*;

pub(crate) trait QueryExt {
    /// A query value exactly as sent, or `None` when absent or blank.
    fn query_text(&self, key: &str) -> Option<String>;

    /// An optional integer paging value; present but unparseable is a 400.
    fn paging_value(&self, key: &str) -> Result<Option<u32>, StatusError>;
}

impl QueryExt for Request {
    fn query_text(&self, key: &str) -> Option<String> {
        self.query::<String>(key)
            .filter(|value| !value.trim().is_empty())
    }

    fn paging_value(&self, key: &str) -> Result<Option<u32>, StatusError> {
        self.query_text(key)
            .map(|value| value.trim().parse::<u32>())
            .transpose()
            .or_400(&format!("could not parse \"{key}\" query parameter"))
    }
}

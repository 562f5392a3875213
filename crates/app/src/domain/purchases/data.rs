//! Purchases Data

use crate::domain::purchases::errors::PurchasesServiceError;

/// Largest page size a listing will return.
pub const MAX_PER_PAGE: u32 = 200;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// New Purchase Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub buyer: String,
    pub product: String,
    pub vendor: String,
}

impl NewPurchase {
    /// Reject empty or whitespace-only identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`PurchasesServiceError::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<(), PurchasesServiceError> {
        require("buyer", &self.buyer)?;
        require("product", &self.product)?;
        require("vendor", &self.vendor)?;

        Ok(())
    }
}

/// Optional listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseFilter {
    pub product: Option<String>,
    pub vendor: Option<String>,
}

impl PurchaseFilter {
    #[must_use]
    pub fn matches(&self, product: &str, vendor: &str) -> bool {
        self.product.as_deref().is_none_or(|wanted| wanted == product)
            && self.vendor.as_deref().is_none_or(|wanted| wanted == vendor)
    }
}

/// Offset/limit paging, clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    per_page: u32,
}

impl Page {
    /// `page` is at least 1; `per_page` is between 1 and [`MAX_PER_PAGE`].
    #[must_use]
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }

    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), PurchasesServiceError> {
    if value.trim().is_empty() {
        return Err(PurchasesServiceError::MissingField(field));
    }

    Ok(())
}

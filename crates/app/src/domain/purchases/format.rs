//! Compact purchase line formatting.
//!
//! Scripting clients split the line positionally: records on the record
//! delimiter, then each record on the field delimiter into `product` and
//! `vendor`. Values are not escaped, so a product or vendor containing either
//! delimiter will be misread by the client.

use crate::domain::purchases::records::PurchaseRecord;

/// Separator placed between records.
pub const DEFAULT_RECORD_DELIMITER: &str = ";";

/// Separator placed between a record's product and vendor.
pub const DEFAULT_FIELD_DELIMITER: &str = "|";

/// Renders records as `product|vendor;product|vendor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseFormatter {
    record_delimiter: String,
    field_delimiter: String,
}

impl PurchaseFormatter {
    #[must_use]
    pub fn new(record_delimiter: impl Into<String>, field_delimiter: impl Into<String>) -> Self {
        Self {
            record_delimiter: record_delimiter.into(),
            field_delimiter: field_delimiter.into(),
        }
    }

    #[must_use]
    pub fn record_delimiter(&self) -> &str {
        &self.record_delimiter
    }

    #[must_use]
    pub fn field_delimiter(&self) -> &str {
        &self.field_delimiter
    }

    /// Format records in the order given. Empty input yields an empty string.
    #[must_use]
    pub fn format(&self, records: &[PurchaseRecord]) -> String {
        let mut line = String::new();

        for (index, record) in records.iter().enumerate() {
            if index > 0 {
                line.push_str(&self.record_delimiter);
            }

            line.push_str(&record.product);
            line.push_str(&self.field_delimiter);
            line.push_str(&record.vendor);
        }

        line
    }
}

impl Default for PurchaseFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_DELIMITER, DEFAULT_FIELD_DELIMITER)
    }
}

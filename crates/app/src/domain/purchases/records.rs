//! Purchase Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Purchase record identifier.
pub type PurchaseUuid = TypedUuid<PurchaseRecord>;

/// Purchase Record
///
/// Immutable once created; the store never updates or deletes records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    /// Server-assigned record identifier.
    pub uuid: PurchaseUuid,

    /// Avatar that made or received the purchase.
    pub buyer: String,

    /// Purchased product identifier.
    pub product: String,

    /// Vendor that granted the purchase.
    pub vendor: String,

    /// Insert time, assigned by the store.
    pub created_at: Timestamp,
}

/// Outcome of a duplicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// A record for the (receiver, product) pair already existed; nothing was written.
    Duplicate,

    /// No record existed; a new one was inserted.
    Inserted,
}

impl Decision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::Inserted => "inserted",
        }
    }
}

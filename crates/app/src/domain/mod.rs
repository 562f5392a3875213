//! Purchase Ledger Domain Concerns

pub mod purchases;

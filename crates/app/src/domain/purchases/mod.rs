//! Purchases

pub mod data;
pub mod duplicates;
pub mod errors;
pub mod format;
pub mod records;
pub mod service;
pub mod store;

pub use errors::PurchasesServiceError;
pub use service::*;

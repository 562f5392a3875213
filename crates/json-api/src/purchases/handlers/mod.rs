//! Purchase Handlers

pub(crate) mod check_duplicate;
pub(crate) mod create;
pub(crate) mod index;

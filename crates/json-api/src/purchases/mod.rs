//! Purchases

mod errors;
mod handlers;
pub(crate) mod replies;
mod requests;

pub(crate) use handlers::*;

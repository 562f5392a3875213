//! Test support.


pub(crate) use db::TestDb;

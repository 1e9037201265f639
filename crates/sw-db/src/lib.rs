//! sw-db - Database abstraction layer for Stepwise
//!
//! This crate provides the `Database` trait the migration engine drives and
//! its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;

//! MySQL store for mysqldbgen.
//!
//! Provides [`MySQLRecordStore`], which writes each record as one
//! transaction of four ordered INSERTs over a shared connection pool, plus
//! the DDL needed to create the target database and tables.
//!
//! Duplicate key errors are recognised by server error code (1062, 1586,
//! 1022) and surface as [`loadgen_populate::StoreError::UniqueViolation`].

pub mod args;
pub mod error;
pub mod insert;
pub mod schema;
pub mod store;

pub use args::{MySQLConnection, MySQLConnectionArgs};
pub use error::MySQLStoreError;
pub use schema::ensure_schema;
pub use store::MySQLRecordStore;

//! Error types for the MySQL store.

use loadgen_populate::StoreError;
use loadgen_record::Table;
use thiserror::Error;

/// ER_DUP_KEY
pub const ER_DUP_KEY: u16 = 1022;
/// ER_DUP_ENTRY
pub const ER_DUP_ENTRY: u16 = 1062;
/// ER_DUP_ENTRY_WITH_KEY_NAME
pub const ER_DUP_ENTRY_WITH_KEY_NAME: u16 = 1586;

/// Errors raised while setting up the MySQL store.
#[derive(Error, Debug)]
pub enum MySQLStoreError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// A DDL statement failed.
    #[error("Schema error: {context}: {source}")]
    Schema {
        context: String,
        #[source]
        source: mysql_async::Error,
    },

    /// An INSERT statement could not be prepared.
    #[error("Failed to prepare insert into {table}: {source}")]
    Prepare {
        table: Table,
        #[source]
        source: mysql_async::Error,
    },
}

/// True for server errors reporting a duplicate primary or unique key.
pub fn is_duplicate_key(err: &mysql_async::Error) -> bool {
    match err {
        mysql_async::Error::Server(server) => matches!(
            server.code,
            ER_DUP_ENTRY | ER_DUP_ENTRY_WITH_KEY_NAME | ER_DUP_KEY
        ),
        _ => false,
    }
}

/// True for errors that mean the connection itself is unusable.
pub fn is_connection_error(err: &mysql_async::Error) -> bool {
    matches!(
        err,
        mysql_async::Error::Io(_) | mysql_async::Error::Driver(_) | mysql_async::Error::Url(_)
    )
}

/// Classify an INSERT failure on `table`.
pub fn classify_write(table: Table, err: mysql_async::Error) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::UniqueViolation {
            table,
            message: err.to_string(),
        }
    } else if is_connection_error(&err) {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Write {
            table,
            message: err.to_string(),
        }
    }
}

/// Classify a failure to obtain a connection or open a transaction.
pub fn classify_connection(err: mysql_async::Error) -> StoreError {
    StoreError::Connection(err.to_string())
}

/// Classify a failed COMMIT.
pub fn classify_commit(err: mysql_async::Error) -> StoreError {
    if is_connection_error(&err) {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Commit(err.to_string())
    }
}

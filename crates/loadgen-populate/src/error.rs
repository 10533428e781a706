//! Error types for the loading pipeline.

use crate::config::ConfigError;
use loadgen_record::Table;
use thiserror::Error;

/// Errors reported by a [`crate::RecordStore`].
///
/// Stores classify their native errors into these kinds; the worker pool
/// only ever looks at the kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A generated key already exists. The record was rolled back.
    #[error("Duplicate key in {table}: {message}")]
    UniqueViolation { table: Table, message: String },

    /// The store could not be reached or a connection could not be obtained.
    #[error("Connection error: {0}")]
    Connection(String),

    /// An insert failed for a reason other than a duplicate key.
    #[error("Insert into {table} failed: {message}")]
    Write { table: Table, message: String },

    /// The transaction could not be committed.
    #[error("Commit failed: {0}")]
    Commit(String),

    /// The operation was abandoned because the run was cancelled.
    #[error("Operation cancelled")]
    Cancelled,
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }
}

/// Terminal outcome of a failed load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// First fatal store error raised by any worker.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The job supply ran out before enough records were committed.
    #[error(
        "only inserted {inserted}/{requested} records (duplicate keys likely); try increasing dbRecords2Process"
    )]
    Shortfall { inserted: u64, requested: u64 },

    /// The run was cancelled from outside.
    #[error("Load cancelled after {inserted} records")]
    Cancelled { inserted: u64 },

    /// A worker task ended without reporting a result.
    #[error("Worker aborted: {0}")]
    Worker(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_classification() {
        let dup = StoreError::UniqueViolation {
            table: Table::Payments,
            message: "Duplicate entry".to_string(),
        };
        assert!(dup.is_unique_violation());
        assert!(!StoreError::Commit("gone".to_string()).is_unique_violation());
        assert!(!StoreError::Cancelled.is_unique_violation());
    }

    #[test]
    fn test_shortfall_message_names_counts() {
        let err = LoadError::Shortfall {
            inserted: 97,
            requested: 100,
        };
        let message = err.to_string();
        assert!(message.contains("97/100"));
        assert!(message.contains("dbRecords2Process"));
    }
}

//! Storage seam between the worker pool and a concrete database.

use crate::error::StoreError;
use async_trait::async_trait;
use loadgen_record::{Record, Table};
use std::sync::Arc;

/// A destination for generated records.
///
/// Implementations write the rows of [`Record::rows`] in order inside one
/// transaction. Either all four rows become visible or none do. A duplicate
/// key must be reported as [`StoreError::UniqueViolation`] after the
/// transaction has been rolled back; every other failure maps to one of the
/// remaining kinds.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_record(&self, record: &Record) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn insert_record(&self, record: &Record) -> Result<(), StoreError> {
        (**self).insert_record(record).await
    }
}

/// Row counts of the four target tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub accounts: u64,
    pub products: u64,
    pub payments: u64,
    pub buying_stats: u64,
}

impl TableCounts {
    pub fn get(&self, table: Table) -> u64 {
        match table {
            Table::Accounts => self.accounts,
            Table::Products => self.products,
            Table::Payments => self.payments,
            Table::BuyingStats => self.buying_stats,
        }
    }

    pub fn set(&mut self, table: Table, count: u64) {
        match table {
            Table::Accounts => self.accounts = count,
            Table::Products => self.products = count,
            Table::Payments => self.payments = count,
            Table::BuyingStats => self.buying_stats = count,
        }
    }

    /// True when every table holds exactly `count` rows.
    pub fn all_equal(&self, count: u64) -> bool {
        Table::ALL.iter().all(|t| self.get(*t) == count)
    }
}

impl std::fmt::Display for TableCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "accounts={} products={} payments={} buying_stats={}",
            self.accounts, self.products, self.payments, self.buying_stats
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_counts() {
        let mut counts = TableCounts::default();
        for table in Table::ALL {
            counts.set(table, 5);
        }
        assert!(counts.all_equal(5));

        counts.set(Table::BuyingStats, 4);
        assert!(!counts.all_equal(5));
        assert_eq!(counts.get(Table::BuyingStats), 4);
        assert_eq!(
            counts.to_string(),
            "accounts=5 products=5 payments=5 buying_stats=4"
        );
    }
}

//! In-memory store and event sink for tests.
//!
//! [`MemoryStore`] behaves like the relational target: primary keys are
//! unique, `buying_stats` foreign keys must resolve against rows already
//! written (or staged earlier in the same record), and a record is applied
//! all-or-nothing. Faults can be injected by attempt number.

use crate::error::StoreError;
use crate::events::{EventSink, LoadEvent};
use crate::store::{RecordStore, TableCounts};
use async_trait::async_trait;
use loadgen_record::{Account, BuyingStat, Payment, Product, Record, Table, TableRow};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// Committed rows of a [`MemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTables {
    pub accounts: HashMap<Uuid, Account>,
    pub products: HashMap<Uuid, Product>,
    pub payments: HashMap<String, Payment>,
    pub buying_stats: Vec<BuyingStat>,
}

impl MemoryTables {
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            accounts: self.accounts.len() as u64,
            products: self.products.len() as u64,
            payments: self.payments.len() as u64,
            buying_stats: self.buying_stats.len() as u64,
        }
    }
}

#[derive(Debug, Default)]
struct Faults {
    collide_every: Option<u64>,
    fail_on_attempt: Option<u64>,
    write_delay: Option<Duration>,
}

/// A [`RecordStore`] backed by hash maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<MemoryTables>,
    attempts: AtomicU64,
    faults: Faults,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every `n`th attempt as a duplicate payment token.
    pub fn collide_every(mut self, n: u64) -> Self {
        self.faults.collide_every = Some(n.max(1));
        self
    }

    /// Fail the given attempt (1-based) with a non-duplicate write error.
    pub fn fail_on_attempt(mut self, attempt: u64) -> Self {
        self.faults.fail_on_attempt = Some(attempt);
        self
    }

    /// Sleep before applying each record.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.faults.write_delay = Some(delay);
        self
    }

    /// Number of `insert_record` calls so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Acquire)
    }

    pub fn counts(&self) -> TableCounts {
        self.lock().counts()
    }

    pub fn snapshot(&self) -> MemoryTables {
        self.lock().clone()
    }

    /// Buying stats whose account or product is missing.
    pub fn dangling_buying_stats(&self) -> usize {
        let tables = self.lock();
        tables
            .buying_stats
            .iter()
            .filter(|bs| {
                !tables.accounts.contains_key(&bs.account_uuid)
                    || !tables.products.contains_key(&bs.product_uuid)
            })
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryTables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn apply(&self, record: &Record) -> Result<(), StoreError> {
        let mut tables = self.lock();
        let mut staged = MemoryTables::default();

        for row in record.rows() {
            match row {
                TableRow::Account(a) => {
                    if tables.accounts.contains_key(&a.uuid) || staged.accounts.contains_key(&a.uuid) {
                        return Err(duplicate(Table::Accounts, &a.uuid.to_string()));
                    }
                    staged.accounts.insert(a.uuid, a.clone());
                }
                TableRow::Product(p) => {
                    if tables.products.contains_key(&p.uuid) || staged.products.contains_key(&p.uuid) {
                        return Err(duplicate(Table::Products, &p.uuid.to_string()));
                    }
                    staged.products.insert(p.uuid, p.clone());
                }
                TableRow::Payment(p) => {
                    if tables.payments.contains_key(&p.token) || staged.payments.contains_key(&p.token) {
                        return Err(duplicate(Table::Payments, &p.token));
                    }
                    staged.payments.insert(p.token.clone(), p.clone());
                }
                TableRow::BuyingStat(bs) => {
                    let account_visible = tables.accounts.contains_key(&bs.account_uuid)
                        || staged.accounts.contains_key(&bs.account_uuid);
                    let product_visible = tables.products.contains_key(&bs.product_uuid)
                        || staged.products.contains_key(&bs.product_uuid);
                    if !account_visible || !product_visible {
                        return Err(StoreError::Write {
                            table: Table::BuyingStats,
                            message: "foreign key constraint fails".to_string(),
                        });
                    }
                    staged.buying_stats.push(bs.clone());
                }
            }
        }

        tables.accounts.extend(staged.accounts);
        tables.products.extend(staged.products);
        tables.payments.extend(staged.payments);
        tables.buying_stats.extend(staged.buying_stats);
        Ok(())
    }
}

fn duplicate(table: Table, key: &str) -> StoreError {
    StoreError::UniqueViolation {
        table,
        message: format!("Duplicate entry '{key}' for key 'PRIMARY'"),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_record(&self, record: &Record) -> Result<(), StoreError> {
        let attempt = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;

        if let Some(delay) = self.faults.write_delay {
            tokio::time::sleep(delay).await;
        }
        if self.faults.fail_on_attempt == Some(attempt) {
            return Err(StoreError::Write {
                table: Table::Accounts,
                message: format!("injected failure on attempt {attempt}"),
            });
        }
        if let Some(n) = self.faults.collide_every {
            if attempt % n == 0 {
                return Err(duplicate(Table::Payments, &record.payment.token));
            }
        }

        self.apply(record)
    }
}

/// Keeps every event it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<LoadEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<LoadEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Counter values of all progress events, in arrival order.
    pub fn progress_counts(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LoadEvent::Progress(p) => Some(p.inserted),
                _ => None,
            })
            .collect()
    }

    pub fn discarded(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, LoadEvent::Discarded { .. }))
            .count()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: LoadEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

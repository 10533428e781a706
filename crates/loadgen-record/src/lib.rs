//! Synthetic record generator for mysqldbgen.
//!
//! A [`Record`] bundles one account, one product, one payment and one
//! buying statistic that reference each other and must be committed
//! together. The generator is a pure function of a random source and a
//! [`RecordConfig`]; the only other input is the wall clock used as "now".
//!
//! # Architecture
//!
//! ```text
//! RecordConfig
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ RecordGenerator  │
//! │                  │
//! │  - config        │
//! │  - rng (StdRng)  │
//! └────────┬─────────┘
//!          │
//!          ▼
//!    Record { account, product, payment, buying_stat }
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadgen_record::{RecordConfig, RecordGenerator};
//!
//! let mut generator = RecordGenerator::from_seed(RecordConfig::default(), 42);
//! let record = generator.next_record();
//! assert_eq!(record.payment.amount, record.buying_stat.total_amount);
//! assert!(record.account.last_login_epoch >= record.account.created_epoch);
//! ```

pub mod generator;
pub mod generators;
pub mod record;

// Re-exports for convenience
pub use generator::{generate, generate_at, RecordConfig, RecordGenerator};
pub use record::{Account, BuyingStat, Payment, Product, Record, Table, TableRow};

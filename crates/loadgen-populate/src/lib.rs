//! Concurrent loading pipeline for mysqldbgen.
//!
//! A single producer feeds job tokens into a bounded queue. A fixed pool of
//! workers pulls tokens, synthesizes a [`loadgen_record::Record`] for each
//! and writes it through a [`RecordStore`] as one transaction. Duplicate key
//! conflicts discard the job; any other store error stops the whole load.
//!
//! ```text
//!   producer ──► [ job queue (workers * 4) ] ──► worker 0..N ──► RecordStore
//!                                                   │
//!                                                   ▼
//!                                         CompletionTracker ──► EventSink
//! ```
//!
//! The supply of job tokens equals the target, so every discarded job
//! lowers the number of records that can still be committed. A run that
//! exhausts the supply early ends with [`LoadError::Shortfall`].

pub mod args;
pub mod config;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod queue;
pub mod store;
pub mod testing;
pub mod tracker;
pub mod worker;

pub use args::LoadArgs;
pub use config::{log_step, ConfigError, LoadConfig};
pub use error::{LoadError, StoreError};
pub use events::{EventSink, LoadEvent, TracingSink};
pub use orchestrator::{LoadOrchestrator, LoadSummary};
pub use store::{RecordStore, TableCounts};
pub use tracker::{CompletionTracker, ProgressSnapshot};
pub use worker::WorkerStats;

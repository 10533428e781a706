//! mysqldbgen library
//!
//! Fills a MySQL database with synthetic `accounts`, `products`, `payments`
//! and `buying_stats` rows for load and integration testing.
//!
//! The work is split across crates:
//!
//! - `loadgen_record` - record synthesis
//! - `loadgen_populate` - job queue, worker pool, completion tracking, orchestration
//! - `loadgen_populate_mysql` - MySQL store and schema setup
//!
//! This crate layers configuration (defaults, YAML file, flags) and wires a
//! run together.
//!
//! # CLI Usage
//!
//! ```bash
//! # Load 10000 records with 8 workers
//! mysqldbgen --host localhost --dbname mytestdb --numWorkers 8 --dbRecords2Process 10000
//!
//! # Read settings from a file, override one of them
//! mysqldbgen --config mysqldbgen.yaml --pcentOutput 5
//!
//! # Print sample records without touching the database
//! mysqldbgen --runOnlyFaker
//! ```

pub mod config;
pub mod faker;
pub mod run;

pub use config::{FileConfig, Settings};
pub use faker::run_faker_only;
pub use run::{cancel_on_ctrl_c, load_database, log_startup, run};

//! CLI argument definitions for the loading pipeline.

use crate::config::LoadConfig;
use clap::Args;

/// Load settings given on the command line.
///
/// Every field is optional so that unset flags leave the value from the
/// config file (or the built-in default) untouched.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadArgs {
    /// Only generate and log sample records, without touching the database
    #[arg(
        long = "runOnlyFaker",
        num_args = 0..=1,
        default_missing_value = "true",
        require_equals = true
    )]
    pub run_only_faker: Option<bool>,

    /// Number of concurrent workers
    #[arg(long = "numWorkers")]
    pub num_workers: Option<usize>,

    /// Number of records to commit
    #[arg(long = "dbRecords2Process")]
    pub db_records: Option<u64>,

    /// Log progress every N percent of the target
    #[arg(long = "pcentOutput")]
    pub pcent_output: Option<u32>,

    /// Lower bound of the account creation offset, in seconds before now
    #[arg(long = "minDays", allow_hyphen_values = true)]
    pub min_days: Option<i64>,

    /// Upper bound of the account creation offset, in seconds before now
    #[arg(long = "maxDays", allow_hyphen_values = true)]
    pub max_days: Option<i64>,

    /// Maximum delay between account creation and last login, in seconds
    #[arg(long = "delayLastLogin", allow_hyphen_values = true)]
    pub delay_last_login: Option<i64>,

    /// Base seed for deterministic record generation
    #[arg(long)]
    pub seed: Option<u64>,
}

impl LoadArgs {
    /// Override fields of `config` with the flags that were given.
    pub fn apply_to(&self, config: &mut LoadConfig) {
        if let Some(workers) = self.num_workers {
            config.workers = workers;
        }
        if let Some(target) = self.db_records {
            config.target = target;
        }
        if let Some(pcent) = self.pcent_output {
            config.pcent_output = pcent;
        }
        if let Some(min) = self.min_days {
            config.record.min_created_ago = min;
        }
        if let Some(max) = self.max_days {
            config.record.max_created_ago = max;
        }
        if let Some(delay) = self.delay_last_login {
            config.record.max_last_login_delay = delay;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

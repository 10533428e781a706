//! Load configuration and validation.

use loadgen_record::RecordConfig;
use thiserror::Error;

/// Lowest connection pool size regardless of worker count.
pub const MIN_POOL_SIZE: usize = 4;

/// Job tokens buffered per worker.
pub const QUEUE_SLOTS_PER_WORKER: usize = 4;

/// Invalid load settings, reported before any connection is opened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dbRecords2Process must be >= 1")]
    ZeroTarget,

    #[error("numWorkers must be >= 1")]
    ZeroWorkers,

    #[error("pcentOutput must be 1..100, got {0}")]
    PercentOutOfRange(u32),

    #[error("maxDays must be >= minDays (minDays={min}, maxDays={max})")]
    InvertedCreatedRange { min: i64, max: i64 },

    #[error("minDays must be >= 0, got {0}")]
    NegativeCreatedOffset(i64),

    #[error("delayLastLogin must be >= 0, got {0}")]
    NegativeLoginDelay(i64),
}

/// Settings consumed by the loading pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Number of concurrent workers.
    pub workers: usize,
    /// Number of records that must be committed.
    pub target: u64,
    /// Progress is reported every `pcent_output` percent of the target.
    pub pcent_output: u32,
    /// Ranges used by the record generator.
    pub record: RecordConfig,
    /// Base seed for worker generators. Wall clock when unset.
    pub seed: Option<u64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            target: 100,
            pcent_output: 10,
            record: RecordConfig::default(),
            seed: None,
        }
    }
}

impl LoadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target < 1 {
            return Err(ConfigError::ZeroTarget);
        }
        if self.workers < 1 {
            return Err(ConfigError::ZeroWorkers);
        }
        if !(1..=100).contains(&self.pcent_output) {
            return Err(ConfigError::PercentOutOfRange(self.pcent_output));
        }
        if self.record.min_created_ago < 0 {
            return Err(ConfigError::NegativeCreatedOffset(self.record.min_created_ago));
        }
        if self.record.max_created_ago < self.record.min_created_ago {
            return Err(ConfigError::InvertedCreatedRange {
                min: self.record.min_created_ago,
                max: self.record.max_created_ago,
            });
        }
        if self.record.max_last_login_delay < 0 {
            return Err(ConfigError::NegativeLoginDelay(
                self.record.max_last_login_delay,
            ));
        }
        Ok(())
    }

    /// Records between two progress reports.
    pub fn log_step(&self) -> u64 {
        log_step(self.target, self.pcent_output)
    }

    /// Capacity of the job queue.
    pub fn queue_capacity(&self) -> usize {
        self.workers * QUEUE_SLOTS_PER_WORKER
    }

    /// Size of the shared connection pool.
    pub fn pool_size(&self) -> usize {
        MIN_POOL_SIZE.max(self.workers * 2)
    }
}

/// `round(total * pcent / 100)`, never below 1.
pub fn log_step(total: u64, pcent: u32) -> u64 {
    let step = (total as f64 * f64::from(pcent) / 100.0).round() as u64;
    step.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_step() {
        assert_eq!(log_step(100, 10), 10);
        assert_eq!(log_step(1000, 1), 10);
        assert_eq!(log_step(5, 10), 1);
        assert_eq!(log_step(15, 10), 2);
        assert_eq!(log_step(3, 1), 1);
        assert_eq!(log_step(7, 100), 7);
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = LoadConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.log_step(), 10);
    }

    #[test]
    fn test_sizing() {
        let config = LoadConfig {
            workers: 1,
            ..Default::default()
        };
        assert_eq!(config.queue_capacity(), 4);
        assert_eq!(config.pool_size(), MIN_POOL_SIZE);

        let config = LoadConfig {
            workers: 20,
            ..Default::default()
        };
        assert_eq!(config.queue_capacity(), 80);
        assert_eq!(config.pool_size(), 40);
    }

    #[test]
    fn test_validation_errors() {
        let base = LoadConfig::default();

        let config = LoadConfig {
            target: 0,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTarget));

        let config = LoadConfig {
            workers: 0,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWorkers));

        for pcent in [0, 101] {
            let config = LoadConfig {
                pcent_output: pcent,
                ..base.clone()
            };
            assert_eq!(config.validate(), Err(ConfigError::PercentOutOfRange(pcent)));
        }

        let config = LoadConfig {
            record: RecordConfig {
                min_created_ago: 10,
                max_created_ago: 5,
                max_last_login_delay: 0,
            },
            ..base.clone()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedCreatedRange { min: 10, max: 5 })
        );

        let config = LoadConfig {
            record: RecordConfig {
                min_created_ago: 0,
                max_created_ago: 5,
                max_last_login_delay: -1,
            },
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeLoginDelay(-1)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::ZeroTarget.to_string(),
            "dbRecords2Process must be >= 1"
        );
        assert_eq!(
            ConfigError::PercentOutOfRange(0).to_string(),
            "pcentOutput must be 1..100, got 0"
        );
    }
}

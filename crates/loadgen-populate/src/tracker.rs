//! Shared count of committed records.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Point-in-time view of load progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub inserted: u64,
    pub target: u64,
    /// Share of the target committed so far, 0-100.
    pub percent: f64,
    /// Records per second since the load started.
    pub rate: f64,
    pub elapsed: Duration,
}

/// Result of counting one commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome {
    /// Counter value after this commit.
    pub count: u64,
    /// Set when `count` is a multiple of the log step.
    pub progress: Option<ProgressSnapshot>,
    /// Set when `count` reached the target.
    pub target_reached: bool,
}

/// Counts committed records for all workers.
///
/// Every increment observes a distinct counter value, so each multiple of the
/// log step is reported by exactly one worker.
#[derive(Debug)]
pub struct CompletionTracker {
    inserted: AtomicU64,
    target: u64,
    log_step: u64,
    started: Instant,
}

impl CompletionTracker {
    pub fn new(target: u64, log_step: u64) -> Self {
        Self {
            inserted: AtomicU64::new(0),
            target,
            log_step: log_step.max(1),
            started: Instant::now(),
        }
    }

    /// Count one committed record.
    pub fn record_success(&self) -> CommitOutcome {
        let count = self.inserted.fetch_add(1, Ordering::AcqRel) + 1;
        CommitOutcome {
            count,
            progress: (count % self.log_step == 0).then(|| self.snapshot_at(count)),
            target_reached: count >= self.target,
        }
    }

    pub fn inserted(&self) -> u64 {
        self.inserted.load(Ordering::Acquire)
    }

    pub fn is_complete(&self) -> bool {
        self.inserted() >= self.target
    }

    pub fn log_step(&self) -> u64 {
        self.log_step
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot_at(self.inserted())
    }

    fn snapshot_at(&self, count: u64) -> ProgressSnapshot {
        let elapsed = self.elapsed();
        ProgressSnapshot {
            inserted: count,
            target: self.target,
            percent: 100.0 * count as f64 / self.target.max(1) as f64,
            rate: rate(count, elapsed),
            elapsed,
        }
    }
}

/// Records per second, with the elapsed time floored at one millisecond.
pub fn rate(count: u64, elapsed: Duration) -> f64 {
    count as f64 / elapsed.as_secs_f64().max(0.001)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_progress_at_each_step() {
        let tracker = CompletionTracker::new(100, 10);
        let mut reported = Vec::new();

        for _ in 0..100 {
            let outcome = tracker.record_success();
            if let Some(progress) = outcome.progress {
                reported.push(progress.inserted);
            }
        }

        assert_eq!(reported, (1..=10).map(|i| i * 10).collect::<Vec<u64>>());
        assert!(tracker.is_complete());
    }

    #[test]
    fn test_target_reached_flag() {
        let tracker = CompletionTracker::new(2, 1);
        assert!(!tracker.record_success().target_reached);
        let last = tracker.record_success();
        assert!(last.target_reached);
        assert_eq!(last.progress.map(|p| p.percent), Some(100.0));
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let tracker = CompletionTracker::new(3, 0);
        assert_eq!(tracker.log_step(), 1);
        assert!(tracker.record_success().progress.is_some());
    }

    #[test]
    fn test_rate_floor() {
        assert!((rate(5, Duration::ZERO) - 5000.0).abs() < 1e-6);
        assert_eq!(rate(10, Duration::from_secs(2)), 5.0);
    }

    #[test]
    fn test_concurrent_increments_are_exact() {
        let tracker = Arc::new(CompletionTracker::new(8_000, 1_000));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    (0..1_000)
                        .filter_map(|_| tracker.record_success().progress)
                        .map(|p| p.inserted)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut reported: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        reported.sort_unstable();

        assert_eq!(tracker.inserted(), 8_000);
        assert_eq!(reported, (1..=8).map(|i| i * 1_000).collect::<Vec<u64>>());
    }
}

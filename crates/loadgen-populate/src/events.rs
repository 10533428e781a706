//! Progress events emitted by the worker pool and orchestrator.
//!
//! The pipeline never logs progress itself. Callers pass an [`EventSink`];
//! [`TracingSink`] forwards events to `tracing`.

use crate::orchestrator::LoadSummary;
use crate::tracker::ProgressSnapshot;
use crate::worker::WorkerStats;
use loadgen_record::Table;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// Workers were spawned and the producer is about to feed jobs.
    Started {
        workers: usize,
        target: u64,
        log_step: u64,
    },
    /// The commit counter crossed a multiple of the log step.
    Progress(ProgressSnapshot),
    /// A record hit a duplicate key and was dropped.
    Discarded { worker: usize, table: Table },
    /// A worker stopped on a fatal error.
    WorkerFailed { worker: usize, error: String },
    /// A worker exited normally.
    WorkerFinished { worker: usize, stats: WorkerStats },
    /// All records were committed.
    Completed(LoadSummary),
}

/// Receives [`LoadEvent`]s. Must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: LoadEvent);
}

/// Writes events as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: LoadEvent) {
        match event {
            LoadEvent::Started {
                workers,
                target,
                log_step,
            } => info!(
                "Loading {} records with {} workers (progress every {} records)",
                target, workers, log_step
            ),
            LoadEvent::Progress(p) => info!(
                "progress: {}/{} ({:.1}%) rate={:.0} rec/s elapsed={}",
                p.inserted,
                p.target,
                p.percent,
                p.rate,
                format_elapsed(p.elapsed)
            ),
            LoadEvent::Discarded { worker, table } => {
                debug!(worker, %table, "duplicate key, record discarded")
            }
            LoadEvent::WorkerFailed { worker, error } => {
                error!(worker, "worker stopped: {}", error)
            }
            LoadEvent::WorkerFinished { worker, stats } => debug!(
                worker,
                attempted = stats.attempted,
                committed = stats.committed,
                discarded = stats.discarded,
                "worker finished"
            ),
            LoadEvent::Completed(summary) => info!(
                "inserted {} records in {} ({:.0} rec/s, {} discarded)",
                summary.inserted,
                format_elapsed(summary.elapsed),
                summary.rate,
                summary.discarded
            ),
        }
    }
}

/// Millisecond-truncated duration, e.g. `1.234s`. Anything below one
/// millisecond prints as `0ms`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let truncated = Duration::from_millis(elapsed.as_millis() as u64);
    if truncated.is_zero() {
        return "0ms".to_string();
    }
    format!("{truncated:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_truncates_to_millis() {
        assert_eq!(format_elapsed(Duration::from_micros(1_234_567)), "1.234s");
        assert_eq!(format_elapsed(Duration::from_micros(999)), "0ms");
        assert_eq!(format_elapsed(Duration::ZERO), "0ms");
        assert_eq!(format_elapsed(Duration::from_micros(12_345)), "12ms");
    }

    #[test]
    fn test_tracing_sink_accepts_every_event() {
        let sink = TracingSink;
        sink.emit(LoadEvent::Started {
            workers: 2,
            target: 10,
            log_step: 1,
        });
        sink.emit(LoadEvent::Discarded {
            worker: 0,
            table: Table::Payments,
        });
        sink.emit(LoadEvent::WorkerFinished {
            worker: 1,
            stats: WorkerStats::default(),
        });
    }
}

//! Worker loop: pull a job, synthesize a record, write it.

use crate::error::StoreError;
use crate::events::{EventSink, LoadEvent};
use crate::queue::JobReceiver;
use crate::store::RecordStore;
use crate::tracker::CompletionTracker;
use loadgen_record::{RecordConfig, RecordGenerator};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Per-worker counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Jobs pulled from the queue.
    pub attempted: u64,
    /// Records committed.
    pub committed: u64,
    /// Records dropped on a duplicate key.
    pub discarded: u64,
}

/// Everything one worker needs.
pub(crate) struct WorkerContext<S> {
    pub id: usize,
    pub store: Arc<S>,
    pub jobs: JobReceiver,
    pub tracker: Arc<CompletionTracker>,
    pub events: Arc<dyn EventSink>,
    pub record_config: RecordConfig,
    pub seed: Option<u64>,
    /// Stops job pulls. Fired by the first fatal error or by `cancel`.
    pub stop: CancellationToken,
    /// External cancellation. Aborts in-flight store operations.
    pub cancel: CancellationToken,
}

/// Run until the queue is drained, the target is reached, or a fatal error
/// occurs. A fatal error fires `stop` before it is returned.
pub(crate) async fn run_worker<S>(ctx: WorkerContext<S>) -> Result<WorkerStats, StoreError>
where
    S: RecordStore + 'static,
{
    let mut generator = RecordGenerator::for_worker(ctx.record_config, ctx.id, ctx.seed);
    let mut stats = WorkerStats::default();

    loop {
        if ctx.tracker.is_complete() {
            break;
        }

        let job = tokio::select! {
            biased;
            _ = ctx.stop.cancelled() => break,
            job = ctx.jobs.next() => job,
        };
        if job.is_none() {
            break;
        }

        let record = generator.next_record();
        stats.attempted += 1;

        let result = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => Err(StoreError::Cancelled),
            result = ctx.store.insert_record(&record) => result,
        };

        match result {
            Ok(()) => {
                stats.committed += 1;
                let outcome = ctx.tracker.record_success();
                if let Some(progress) = outcome.progress {
                    ctx.events.emit(LoadEvent::Progress(progress));
                }
                if outcome.target_reached {
                    break;
                }
            }
            Err(StoreError::UniqueViolation { table, .. }) => {
                stats.discarded += 1;
                ctx.events.emit(LoadEvent::Discarded {
                    worker: ctx.id,
                    table,
                });
            }
            Err(StoreError::Cancelled) => {
                ctx.stop.cancel();
                debug!(worker = ctx.id, "worker cancelled");
                return Err(StoreError::Cancelled);
            }
            Err(e) => {
                ctx.stop.cancel();
                ctx.events.emit(LoadEvent::WorkerFailed {
                    worker: ctx.id,
                    error: e.to_string(),
                });
                return Err(e);
            }
        }
    }

    ctx.events.emit(LoadEvent::WorkerFinished {
        worker: ctx.id,
        stats,
    });
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::job_queue;
    use crate::testing::{CollectingSink, MemoryStore};
    use std::time::Duration;

    fn context(
        store: Arc<MemoryStore>,
        jobs: JobReceiver,
        target: u64,
        events: Arc<CollectingSink>,
    ) -> WorkerContext<MemoryStore> {
        let cancel = CancellationToken::new();
        WorkerContext {
            id: 0,
            store,
            jobs,
            tracker: Arc::new(CompletionTracker::new(target, 1)),
            events,
            record_config: RecordConfig::default(),
            seed: Some(1),
            stop: cancel.child_token(),
            cancel,
        }
    }

    #[tokio::test]
    async fn test_worker_drains_queue() {
        let store = Arc::new(MemoryStore::new());
        let events = Arc::new(CollectingSink::default());
        let (sender, receiver) = job_queue(8);
        let ctx = context(Arc::clone(&store), receiver, 5, Arc::clone(&events));

        sender.feed(5, &CancellationToken::new()).await;
        let stats = run_worker(ctx).await.unwrap();

        assert_eq!(
            stats,
            WorkerStats {
                attempted: 5,
                committed: 5,
                discarded: 0
            }
        );
        assert!(store.counts().all_equal(5));
        assert_eq!(events.progress_counts(), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_worker_discards_duplicates() {
        let store = Arc::new(MemoryStore::new().collide_every(2));
        let events = Arc::new(CollectingSink::default());
        let (sender, receiver) = job_queue(8);
        let ctx = context(Arc::clone(&store), receiver, 6, Arc::clone(&events));

        sender.feed(6, &CancellationToken::new()).await;
        let stats = run_worker(ctx).await.unwrap();

        assert_eq!(stats.attempted, 6);
        assert_eq!(stats.committed, 3);
        assert_eq!(stats.discarded, 3);
        assert!(store.counts().all_equal(3));
        assert_eq!(events.discarded(), 3);
    }

    #[tokio::test]
    async fn test_worker_stops_on_fatal_error() {
        let store = Arc::new(MemoryStore::new().fail_on_attempt(2));
        let events = Arc::new(CollectingSink::default());
        let (sender, receiver) = job_queue(8);
        let ctx = context(Arc::clone(&store), receiver, 6, Arc::clone(&events));
        let stop = ctx.stop.clone();

        sender.feed(6, &CancellationToken::new()).await;
        let err = run_worker(ctx).await.unwrap_err();

        assert!(matches!(err, StoreError::Write { .. }));
        assert!(stop.is_cancelled());
        assert!(store.counts().all_equal(1));
        assert_eq!(store.attempts(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_worker_reports_no_failure() {
        let store = Arc::new(MemoryStore::new().with_write_delay(Duration::from_secs(60)));
        let events = Arc::new(CollectingSink::default());
        let (sender, receiver) = job_queue(8);
        let ctx = context(Arc::clone(&store), receiver, 6, Arc::clone(&events));
        let cancel = ctx.cancel.clone();
        let stop = ctx.stop.clone();

        sender.feed(6, &CancellationToken::new()).await;
        let handle = tokio::spawn(run_worker(ctx));
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
        let err = handle.await.unwrap().unwrap_err();

        assert!(matches!(err, StoreError::Cancelled));
        assert!(stop.is_cancelled());
        assert!(!events
            .events()
            .iter()
            .any(|e| matches!(e, LoadEvent::WorkerFailed { .. })));
    }

    #[tokio::test]
    async fn test_worker_stops_when_target_reached() {
        let store = Arc::new(MemoryStore::new());
        let events = Arc::new(CollectingSink::default());
        let (sender, receiver) = job_queue(8);
        let ctx = context(Arc::clone(&store), receiver, 2, Arc::clone(&events));

        sender.feed(5, &CancellationToken::new()).await;
        let stats = run_worker(ctx).await.unwrap();

        assert_eq!(stats.committed, 2);
        assert_eq!(stats.attempted, 2);
    }
}

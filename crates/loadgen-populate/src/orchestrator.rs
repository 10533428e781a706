//! Load orchestration: spawn workers, feed the job supply, settle the outcome.

use crate::config::LoadConfig;
use crate::error::{LoadError, StoreError};
use crate::events::{EventSink, LoadEvent, TracingSink};
use crate::queue::job_queue;
use crate::store::RecordStore;
use crate::tracker::{rate, CompletionTracker};
use crate::worker::{run_worker, WorkerContext};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// Records committed. Equals the target on success.
    pub inserted: u64,
    /// Records dropped on duplicate keys.
    pub discarded: u64,
    pub elapsed: Duration,
    /// Records per second.
    pub rate: f64,
}

/// Runs one load against a [`RecordStore`].
pub struct LoadOrchestrator<S> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
    cancel: CancellationToken,
}

impl<S: RecordStore + 'static> LoadOrchestrator<S> {
    /// Create an orchestrator that logs through `tracing` and is never
    /// cancelled from outside.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            events: Arc::new(TracingSink),
            cancel: CancellationToken::new(),
        }
    }

    /// Send events to the given sink instead of `tracing`.
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Abort in-flight store operations when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Commit exactly `config.target` records or fail.
    ///
    /// Exactly `target` job tokens are fed. Duplicate-key discards consume
    /// tokens too, so the supply can run out first; that ends in
    /// [`LoadError::Shortfall`]. The first fatal store error wins over a
    /// shortfall.
    pub async fn load(&self, config: &LoadConfig) -> Result<LoadSummary, LoadError> {
        config.validate()?;

        let tracker = Arc::new(CompletionTracker::new(config.target, config.log_step()));
        let stop = self.cancel.child_token();
        let (sender, receiver) = job_queue(config.queue_capacity());

        self.events.emit(LoadEvent::Started {
            workers: config.workers,
            target: config.target,
            log_step: tracker.log_step(),
        });

        let mut workers = JoinSet::new();
        for id in 0..config.workers {
            workers.spawn(run_worker(WorkerContext {
                id,
                store: Arc::clone(&self.store),
                jobs: receiver.clone(),
                tracker: Arc::clone(&tracker),
                events: Arc::clone(&self.events),
                record_config: config.record,
                seed: config.seed,
                stop: stop.clone(),
                cancel: self.cancel.clone(),
            }));
        }
        // Workers hold the only receivers from here on, so the producer
        // notices when all of them have exited.
        drop(receiver);

        let fed = sender.feed(config.target, &stop).await;
        debug!(fed, "job supply closed");

        let mut first_error: Option<LoadError> = None;
        let mut discarded = 0;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(stats)) => discarded += stats.discarded,
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e.into());
                    }
                }
                Err(join_error) => {
                    stop.cancel();
                    if first_error.is_none() {
                        first_error = Some(LoadError::Worker(join_error.to_string()));
                    }
                }
            }
        }

        let inserted = tracker.inserted();
        match first_error {
            Some(LoadError::Store(StoreError::Cancelled)) => {
                return Err(LoadError::Cancelled { inserted })
            }
            Some(err) => return Err(err),
            None => {}
        }
        if self.cancel.is_cancelled() {
            return Err(LoadError::Cancelled { inserted });
        }
        if inserted < config.target {
            return Err(LoadError::Shortfall {
                inserted,
                requested: config.target,
            });
        }

        let elapsed = tracker.elapsed();
        let summary = LoadSummary {
            inserted,
            discarded,
            elapsed,
            rate: rate(inserted, elapsed),
        };
        self.events.emit(LoadEvent::Completed(summary.clone()));
        Ok(summary)
    }
}

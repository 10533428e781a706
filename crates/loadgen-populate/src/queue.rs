//! Bounded job queue shared by the producer and all workers.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// One desired record. Consuming a token does not guarantee a commit.
pub type JobToken = u64;

/// Create a queue holding at most `capacity` unread tokens.
pub fn job_queue(capacity: usize) -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        JobSender { tx },
        JobReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producer side. Dropping it closes the queue.
pub struct JobSender {
    tx: mpsc::Sender<JobToken>,
}

impl JobSender {
    /// Feed tokens `0..count`, waiting for free slots.
    ///
    /// Stops early when `stop` fires or when every receiver is gone. Closes
    /// the queue on return and reports how many tokens were queued.
    pub async fn feed(self, count: u64, stop: &CancellationToken) -> u64 {
        let mut fed = 0;
        for token in 0..count {
            let sent = tokio::select! {
                biased;
                _ = stop.cancelled() => false,
                result = self.tx.send(token) => result.is_ok(),
            };
            if !sent {
                break;
            }
            fed += 1;
        }
        fed
    }
}

/// Consumer side, cloned into every worker.
#[derive(Clone)]
pub struct JobReceiver {
    rx: Arc<Mutex<mpsc::Receiver<JobToken>>>,
}

impl JobReceiver {
    /// Next token, or `None` once the queue is closed and drained.
    pub async fn next(&self) -> Option<JobToken> {
        self.rx.lock().await.recv().await
    }
}

//! Fan-out dispatcher.
//!
//! A single worker drains the fan-out queue in FIFO order. Each job is
//! pushed to every current participant except the excluded one, one task
//! per target, and the worker waits for all of them before taking the
//! next job. A target whose delivery cannot connect is evicted.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

use super::delivery::Deliver;
use super::event::FanoutJob;
use super::state::SharedState;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Delivered,
    Rejected,
    Evicted,
}

/// Per-job summary of delivery outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Targets that accepted the event.
    pub delivered: usize,
    /// Targets that answered with an error.
    pub rejected: usize,
    /// Targets that could not be reached and were removed.
    pub evicted: usize,
}

impl DispatchReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Delivered => self.delivered += 1,
            Outcome::Rejected => self.rejected += 1,
            Outcome::Evicted => self.evicted += 1,
        }
    }

    /// Number of delivery attempts made.
    pub fn attempted(&self) -> usize {
        self.delivered + self.rejected + self.evicted
    }
}

/// Serialized consumer of the fan-out queue.
pub struct FanoutDispatcher<D> {
    state: SharedState,
    queue: mpsc::Receiver<FanoutJob>,
    deliverer: Arc<D>,
}

impl<D: Deliver> FanoutDispatcher<D> {
    pub fn new(state: SharedState, queue: mpsc::Receiver<FanoutJob>, deliverer: D) -> Self {
        Self {
            state,
            queue,
            deliverer: Arc::new(deliverer),
        }
    }

    /// Run the dispatcher on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Process jobs until every producer has been dropped.
    pub async fn run(mut self) {
        debug!("Fan-out dispatcher started");
        while let Some(job) = self.queue.recv().await {
            let report = self.dispatch(&job).await;
            debug!(
                origin = %job.event.origin,
                delivered = report.delivered,
                rejected = report.rejected,
                evicted = report.evicted,
                "Fan-out complete"
            );
        }
        debug!("Fan-out dispatcher stopped");
    }

    /// Push one job to every current participant except the excluded one.
    pub async fn dispatch(&self, job: &FanoutJob) -> DispatchReport {
        let targets = self.state.lock().await.members.snapshot();

        let mut tasks = JoinSet::new();
        for target in targets.into_iter().filter(|p| p.id != job.exclude) {
            let deliverer = Arc::clone(&self.deliverer);
            let state = Arc::clone(&self.state);
            let event = job.event.clone();

            tasks.spawn(async move {
                match deliverer.deliver(&target, &event).await {
                    Ok(()) => Outcome::Delivered,
                    Err(e) if e.is_unreachable() => {
                        let evicted = state.lock().await.members.evict(&target);
                        if evicted {
                            warn!(participant = %target.id, error = %e, "Evicted unreachable participant");
                        }
                        Outcome::Evicted
                    }
                    Err(e) => {
                        debug!(participant = %target.id, error = %e, "Delivery rejected");
                        Outcome::Rejected
                    }
                }
            });
        }

        let mut report = DispatchReport::default();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(outcome) => report.record(outcome),
                Err(e) => warn!("Delivery task failed: {}", e),
            }
        }
        report
    }
}

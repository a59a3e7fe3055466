//! Coordinator: the join/send/leave operations.
//!
//! Every operation commits its state change under the shared lock, then
//! enqueues a [`FanoutJob`] after the lock is released. The enqueue waits
//! while the queue is full, which is the only backpressure path.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::delivery::Deliver;
use super::dispatcher::FanoutDispatcher;
use super::event::{ChatEvent, FanoutJob};
use super::membership::Participant;
use super::state::{shared_state, SharedState};
use crate::{RelayError, Result};

/// Default capacity of the fan-out queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Coordinator for membership, history and broadcast.
pub struct Coordinator {
    state: SharedState,
    queue: mpsc::Sender<FanoutJob>,
}

impl Coordinator {
    /// Create a coordinator and the receiving end of its fan-out queue.
    pub fn new(queue_capacity: usize) -> (Self, mpsc::Receiver<FanoutJob>) {
        let (queue, receiver) = mpsc::channel(queue_capacity.max(1));
        let coordinator = Self {
            state: shared_state(),
            queue,
        };
        (coordinator, receiver)
    }

    /// Create a coordinator and spawn its fan-out dispatcher.
    pub fn start<D: Deliver>(
        queue_capacity: usize,
        deliverer: D,
    ) -> (Arc<Self>, JoinHandle<()>) {
        let (coordinator, receiver) = Self::new(queue_capacity);
        let dispatcher = FanoutDispatcher::new(coordinator.state(), receiver, deliverer);
        (Arc::new(coordinator), dispatcher.spawn())
    }

    /// Handle to the shared state.
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    /// Register a participant and return the history accepted before it.
    ///
    /// Rejoining with an existing id replaces the previous callback address.
    pub async fn join(&self, id: &str, callback: &str) -> Result<Vec<ChatEvent>> {
        if id.is_empty() || callback.is_empty() {
            return Err(RelayError::InvalidArgument(
                "id and callback are required".to_string(),
            ));
        }

        let notice = ChatEvent::joined(id);
        let (history, total) = {
            let mut state = self.state.lock().await;
            if let Some(previous) = state.members.insert(Participant::new(id, callback)) {
                debug!(
                    participant = id,
                    old_callback = %previous.callback,
                    new_callback = callback,
                    "Rejoin replaced callback address"
                );
            }
            let history = state.log.snapshot();
            state.log.append(notice.clone());
            (history, state.members.len())
        };

        self.enqueue(FanoutJob::excluding(notice, id)).await;

        info!(participant = id, total, "User {} joined", id);
        Ok(history)
    }

    /// Accept a user message.
    ///
    /// The timestamp is always set by the coordinator.
    pub async fn send(&self, event: ChatEvent) -> Result<()> {
        if event.origin.is_empty() || event.body.is_empty() {
            return Err(RelayError::InvalidArgument(
                "from and body are required".to_string(),
            ));
        }

        let event = event.restamp();
        self.state.lock().await.log.append(event.clone());

        debug!(participant = %event.origin, "Message accepted");
        self.enqueue(FanoutJob::from_origin(event)).await;
        Ok(())
    }

    /// Remove a participant.
    ///
    /// Always records a notice, even when `id` was not a member.
    pub async fn leave(&self, id: &str) {
        let notice = ChatEvent::left(id);
        let was_member = {
            let mut state = self.state.lock().await;
            let removed = state.members.remove(id).is_some();
            state.log.append(notice.clone());
            removed
        };

        self.enqueue(FanoutJob::excluding(notice, id)).await;

        if was_member {
            info!(participant = id, "User {} left", id);
        } else {
            debug!(participant = id, "Leave for unknown participant");
        }
    }

    /// Copy of the full message log.
    pub async fn history(&self) -> Vec<ChatEvent> {
        self.state.lock().await.log.snapshot()
    }

    /// Copy of the current membership.
    pub async fn participants(&self) -> Vec<Participant> {
        self.state.lock().await.members.snapshot()
    }

    /// Whether `id` is currently registered.
    pub async fn is_participant(&self, id: &str) -> bool {
        self.state.lock().await.members.contains(id)
    }

    /// Number of registered participants.
    pub async fn participant_count(&self) -> usize {
        self.state.lock().await.members.len()
    }

    async fn enqueue(&self, job: FanoutJob) {
        if self.queue.send(job).await.is_err() {
            warn!("Fan-out dispatcher is gone; event recorded but not broadcast");
        }
    }
}

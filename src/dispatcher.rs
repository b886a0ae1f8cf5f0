use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::CacheError;
use crate::job::JobDescriptor;

/// The job-queue collaborator the orchestrator submits regeneration work to.
///
/// Enqueueing is fire-and-forget from the orchestrator's point of view:
/// scheduling, concurrency and retries of submitted jobs belong to the
/// worker runtime behind this trait.
#[async_trait]
pub trait WorkerDispatcher: Send + Sync {
    /// Whether any worker capacity exists. May be approximate; the
    /// orchestrator only uses it to decide between enqueueing and degrading
    /// to inline regeneration.
    fn has_workers(&self) -> bool;

    /// Submit a job for background execution.
    async fn enqueue(&self, job: JobDescriptor) -> Result<(), CacheError>;
}

/// Dispatcher that ships descriptors over an in-process channel.
///
/// Pairs with a [`JobRunner`](crate::worker::JobRunner) loop draining the
/// receiving end. `has_workers` reports whether that consumer is still
/// alive, so dropping the runner makes the store degrade to inline
/// regeneration instead of enqueueing into the void.
#[derive(Clone)]
pub struct QueueDispatcher {
    sender: mpsc::UnboundedSender<JobDescriptor>,
}

impl QueueDispatcher {
    /// Create a dispatcher and the receiver its jobs arrive on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<JobDescriptor>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (QueueDispatcher { sender }, receiver)
    }
}

#[async_trait]
impl WorkerDispatcher for QueueDispatcher {
    fn has_workers(&self) -> bool {
        !self.sender.is_closed()
    }

    async fn enqueue(&self, job: JobDescriptor) -> Result<(), CacheError> {
        self.sender
            .send(job)
            .map_err(|e| CacheError::Dispatch(e.to_string()))
    }
}

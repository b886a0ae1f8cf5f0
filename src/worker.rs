//! Worker-side job execution.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::backend::BackendCache;
use crate::entry::CacheEntry;
use crate::error::CacheError;
use crate::generator::GeneratorRegistry;
use crate::job::JobDescriptor;

/// Executes dequeued job descriptors.
///
/// A runner lives in the worker process with its own backend connection and
/// its own registry of generators. It uses the exact same write contract as
/// the store's synchronous path, so a replaced stale value is
/// indistinguishable regardless of which path produced it.
pub struct JobRunner {
    registry: GeneratorRegistry,
    backend: Arc<dyn BackendCache>,
}

impl JobRunner {
    pub fn new(registry: GeneratorRegistry, backend: Arc<dyn BackendCache>) -> Self {
        JobRunner { registry, backend }
    }

    /// Execute one descriptor: resolve the generator, call it with the
    /// descriptor's arguments and write the result back under the
    /// descriptor's key, version and TTL.
    pub async fn run_job(&self, job: JobDescriptor) -> Result<(), CacheError> {
        let generator = self.registry.resolve(&job.generator)?;
        let value = generator.call(&job.args).await?;

        self.backend
            .write(
                &job.key,
                CacheEntry::new(value, job.version),
                job.expires_in(),
            )
            .await?;

        tracing::debug!(key = %job.key, generator = %job.generator, "regenerated in background");
        Ok(())
    }

    /// Drain a [`QueueDispatcher`](crate::dispatcher::QueueDispatcher)
    /// channel until the sending side closes.
    ///
    /// Per-job failures are logged and skipped; one bad descriptor must not
    /// stop the worker.
    pub async fn run(self, mut receiver: mpsc::UnboundedReceiver<JobDescriptor>) {
        while let Some(job) = receiver.recv().await {
            let key = job.key.clone();
            if let Err(e) = self.run_job(job).await {
                tracing::warn!(key = %key, error = %e, "background regeneration failed");
            }
        }
    }
}

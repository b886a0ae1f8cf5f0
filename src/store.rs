use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::BackendCache;
use crate::dispatcher::WorkerDispatcher;
use crate::entry::{CacheEntry, Version};
use crate::error::CacheError;
use crate::generator::Generator;
use crate::job::JobDescriptor;
use crate::key;
use crate::policy::{decide, Decision};

/// Per-fetch configuration.
pub struct FetchOptions {
    /// TTL applied when the (re)computed value is written.
    pub expires_in: Duration,
    /// Arguments passed to the generator and folded into the cache key.
    pub arguments: Vec<Value>,
    /// Demand a fresh value inline instead of serving stale while a worker
    /// refreshes. Forced on when the generator has no cross-process
    /// representation.
    pub synchronous_regen: bool,
}

impl FetchOptions {
    pub fn new(expires_in: Duration) -> Self {
        FetchOptions {
            expires_in,
            arguments: Vec::new(),
            synchronous_regen: false,
        }
    }

    pub fn arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn synchronous(mut self) -> Self {
        self.synchronous_regen = true;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions::new(Duration::from_secs(60))
    }
}

/// Builder for [`Store`].
///
/// Both collaborators are required: a store without a worker dispatcher
/// could never implement an Enqueue decision, so its absence is a
/// configuration error at build time rather than a surprise at fetch time.
#[derive(Default)]
pub struct StoreBuilder {
    backend: Option<Arc<dyn BackendCache>>,
    dispatcher: Option<Arc<dyn WorkerDispatcher>>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        StoreBuilder::default()
    }

    pub fn backend(mut self, backend: Arc<dyn BackendCache>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn dispatcher(mut self, dispatcher: Arc<dyn WorkerDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn build(self) -> Result<Store, CacheError> {
        let backend = self
            .backend
            .ok_or_else(|| CacheError::Configuration("no backend cache supplied".to_string()))?;
        let dispatcher = self.dispatcher.ok_or_else(|| {
            CacheError::Configuration("no worker dispatcher supplied".to_string())
        })?;
        Ok(Store {
            backend,
            dispatcher,
        })
    }
}

/// The stale-while-revalidate orchestrator.
///
/// Owns no entries and no mutable state; it composes the backend cache, the
/// worker dispatcher and the regeneration decision table into [`Store::fetch`].
/// Concurrent fetches for the same stale key may both regenerate; there is
/// no single-flight coordination here.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn BackendCache>,
    dispatcher: Arc<dyn WorkerDispatcher>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Fetch the value for `logical_key` at `version`.
    ///
    /// The cached entry is fresh only if its stored version equals
    /// `version`; any other version, older or newer, is stale. Depending on
    /// the regeneration decision this either computes the value inline,
    /// returns the stale value after handing a [`JobDescriptor`] to the
    /// dispatcher, or returns the cached value untouched.
    ///
    /// Backend and dispatch failures propagate unchanged; an enqueue failure
    /// fails the fetch even though a stale value existed.
    pub async fn fetch<V>(
        &self,
        logical_key: &str,
        version: Version,
        opts: FetchOptions,
        generator: &dyn Generator,
    ) -> Result<V, CacheError>
    where
        V: DeserializeOwned,
    {
        let base = key::base_key(logical_key, &generator.fingerprint());
        let full = key::full_key(&base, &opts.arguments);

        let entry = self.backend.read(&full).await?;
        let has_cached_data = entry.is_some();
        let needs_regen = entry
            .as_ref()
            .map_or(true, |entry| entry.version != version);

        // A generator without a cross-process representation could never be
        // replayed by a worker, so it is pinned to synchronous regeneration.
        let representation = generator.representation();
        let synchronous = opts.synchronous_regen || representation.is_err();

        // has_workers() is consulted only when the decision could be Enqueue.
        let has_workers =
            has_cached_data && needs_regen && !synchronous && self.dispatcher.has_workers();

        let decision = decide(has_cached_data, needs_regen, synchronous, has_workers);
        tracing::debug!(key = %full, decision = ?decision, "fetch");

        match (decision, entry) {
            (Decision::Generate, _) => {
                let value = generator.call(&opts.arguments).await?;
                self.backend
                    .write(
                        &full,
                        CacheEntry::new(value.clone(), version),
                        opts.expires_in,
                    )
                    .await?;
                typed(value)
            }
            (Decision::Enqueue, Some(entry)) => {
                let job = JobDescriptor {
                    key: full,
                    version,
                    // Saturate rather than wrap for absurdly large TTLs.
                    expires_in_ms: u64::try_from(opts.expires_in.as_millis())
                        .unwrap_or(u64::MAX),
                    generator: representation?,
                    args: opts.arguments,
                };
                self.dispatcher.enqueue(job).await?;
                typed(entry.value)
            }
            (Decision::Current, Some(entry)) => typed(entry.value),
            // decide() only yields Enqueue/Current when an entry exists.
            (_, None) => Err(CacheError::operation(
                self.backend.name(),
                full,
                "decision requires a cached entry",
            )),
        }
    }
}

fn typed<V: DeserializeOwned>(value: Value) -> Result<V, CacheError> {
    serde_json::from_value(value).map_err(|e| CacheError::Serialization(e.to_string()))
}

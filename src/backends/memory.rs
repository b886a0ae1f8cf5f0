use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::backend::BackendCache;
use crate::entry::{now_ms, CacheEntry};
use crate::error::CacheError;

/// Internal stored entry with its expiry time.
#[derive(Clone)]
struct Stored {
    expires: i64,
    entry: CacheEntry,
}

/// Thread-safe in-memory backend using a HashMap with an RwLock.
///
/// Expired entries are dropped lazily on read. Suitable for tests and
/// single-process deployments; production deployments normally point the
/// store at a shared backend so worker write-backs are visible to all
/// requesters.
#[derive(Default)]
pub struct MemoryBackend {
    state: RwLock<HashMap<String, Stored>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            state: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live entries, for tests.
    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }
}

#[async_trait]
impl BackendCache for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let state = self.state.read().await;

        let Some(stored) = state.get(key) else {
            return Ok(None);
        };

        if stored.expires <= now_ms() {
            // Entry is expired, remove it
            drop(state);
            let mut state = self.state.write().await;
            state.remove(key);
            return Ok(None);
        }

        Ok(Some(stored.entry.clone()))
    }

    async fn write(&self, key: &str, entry: CacheEntry, ttl: Duration) -> Result<(), CacheError> {
        // Saturate rather than wrap: an overflowed expiry would make the
        // entry instantly dead.
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires = now_ms().saturating_add(ttl_ms);
        let mut state = self.state.write().await;
        state.insert(key.to_string(), Stored { expires, entry });
        Ok(())
    }
}

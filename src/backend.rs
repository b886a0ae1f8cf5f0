use async_trait::async_trait;
use std::time::Duration;

use crate::entry::CacheEntry;
use crate::error::CacheError;

/// The key/value store entries live in.
///
/// The backend treats keys as opaque strings and must preserve the
/// value/version pairing exactly. It is authoritative for entry storage and
/// TTL expiry; the orchestrator layers no transactional guarantees on top,
/// so implementations must provide atomic read/write semantics for a single
/// key. Failures are not retried here and surface unchanged to the caller
/// of `fetch`.
#[async_trait]
pub trait BackendCache: Send + Sync {
    /// A name for diagnostics.
    ///
    /// # Example
    /// - "memory"
    /// - "redis"
    fn name(&self) -> &'static str;

    /// Return the stored entry.
    ///
    /// The response must be `None` for misses and for entries whose TTL has
    /// elapsed.
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>, CacheError>;

    /// Store an entry under `key`, expiring after `ttl`.
    async fn write(&self, key: &str, entry: CacheEntry, ttl: Duration) -> Result<(), CacheError>;
}

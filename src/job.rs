use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::entry::Version;

/// The self-contained unit handed to a background worker.
///
/// A descriptor is the wire contract between submission and execution: the
/// worker has no access to the requester's memory, so everything it needs is
/// here. That means the exact storage key, the version and TTL to write back
/// with, the generator's reproducible representation and the serialized
/// argument list. Created per Enqueue decision, consumed exactly once,
/// discarded after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Full cache key the result is written back under.
    pub key: String,
    /// Version to stamp the recomputed value with.
    pub version: Version,
    /// TTL for the write-back, in milliseconds.
    pub expires_in_ms: u64,
    /// The generator's `{name}@{fingerprint}` representation.
    pub generator: String,
    /// Ordered arguments the generator is called with.
    pub args: Vec<Value>,
}

impl JobDescriptor {
    pub fn expires_in(&self) -> Duration {
        Duration::from_millis(self.expires_in_ms)
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Freshness stamp stored alongside a cached value.
///
/// A version is an opaque token supplied by the caller at fetch time,
/// typically a timestamp of the data the value was derived from. Staleness
/// is signalled by *inequality* with the requested version, not by recency:
/// an entry stamped with any other version, older or newer, is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Create a version from an arbitrary caller-chosen stamp.
    pub fn new(stamp: i64) -> Self {
        Version(stamp)
    }

    /// The current time in milliseconds since the UNIX epoch.
    pub fn now() -> Self {
        Version(now_ms())
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Version {
    fn from(stamp: i64) -> Self {
        Version(stamp)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A cached value and the version that produced it.
///
/// Values are held as JSON so that the synchronous regeneration path and the
/// out-of-process worker write-back path store byte-identical entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached value.
    pub value: Value,
    /// The version that produced `value`.
    pub version: Version,
}

impl CacheEntry {
    pub fn new(value: Value, version: Version) -> Self {
        CacheEntry { value, version }
    }
}

/// Get the current time in milliseconds since UNIX epoch.
pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

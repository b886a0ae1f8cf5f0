//! regen-cache - stale-while-revalidate caching with background regeneration
//!
//! Callers fetch a value by logical key and a freshness version. When the
//! cached value is missing or stamped with a different version, the store
//! either recomputes it inline or hands a self-describing job to an external
//! worker while immediately returning the stale value:
//! - Missing entry: compute inline, write back, return fresh
//! - Stale entry, workers available: return stale, refresh in the background
//! - Stale entry, no workers: degrade to inline recomputation
//! - Fresh entry: return as-is, no I/O beyond the read
//!
//! # Example
//!
//! ```ignore
//! use regen_cache::{
//!     FetchOptions, FnGenerator, MemoryBackend, QueueDispatcher, Store, Version,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(MemoryBackend::new());
//!     let (dispatcher, jobs) = QueueDispatcher::channel();
//!     // A worker process would drain `jobs` with a JobRunner.
//!
//!     let store = Store::builder()
//!         .backend(backend)
//!         .dispatcher(Arc::new(dispatcher))
//!         .build()
//!         .unwrap();
//!
//!     let gen = FnGenerator::new("user-report", "report(user_id)", |args| {
//!         Ok(json!(format!("report for {}", args[0])))
//!     });
//!
//!     let report: String = store
//!         .fetch(
//!             "reports",
//!             Version::now(),
//!             FetchOptions::new(Duration::from_secs(3600)).arguments(vec![json!(42)]),
//!             &gen,
//!         )
//!         .await
//!         .unwrap();
//! }
//! ```

mod backend;
pub mod backends;
mod dispatcher;
mod entry;
mod error;
mod generator;
mod job;
pub mod key;
pub mod policy;
mod store;
mod worker;

// Re-export public API
pub use backend::BackendCache;
pub use backends::memory::MemoryBackend;
pub use dispatcher::{QueueDispatcher, WorkerDispatcher};
pub use entry::{CacheEntry, Version};
pub use error::CacheError;
pub use generator::{FnGenerator, Generator, GeneratorFn, GeneratorRegistry};
pub use job::JobDescriptor;
pub use policy::{decide, Decision};
pub use store::{FetchOptions, Store, StoreBuilder};
pub use worker::JobRunner;

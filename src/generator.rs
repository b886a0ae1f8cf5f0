//! Reproducible computations.
//!
//! A generator is the unit of logic that computes a cacheable value from
//! arguments. Because a background worker runs in a separate process with no
//! access to the requester's memory, a generator that should be refreshable
//! in the background must be representable as data: a stable name plus a
//! fingerprint of its definition, resolved back to the registered
//! computation inside the worker. Generators that capture process-local
//! state have no representation and are regenerated synchronously instead.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CacheError;
use crate::key;

/// A computation `(arguments) -> value` that can describe itself well enough
/// to be re-invoked in another process.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Stable name under which workers can look this computation up.
    fn name(&self) -> &str;

    /// Source-like text of the computation.
    ///
    /// The definition is fingerprinted into cache keys, so changing it
    /// transparently invalidates entries computed by the old definition.
    fn definition(&self) -> &str;

    /// Fingerprint of the definition, folded into every cache key.
    fn fingerprint(&self) -> String {
        key::fingerprint(self.definition())
    }

    /// The reproducible cross-process form, `{name}@{fingerprint}`.
    ///
    /// Returns `CacheError::GeneratorRepresentation` when the computation
    /// cannot be replayed outside this process.
    fn representation(&self) -> Result<String, CacheError> {
        Ok(format!("{}@{}", self.name(), self.fingerprint()))
    }

    /// Compute the value from the argument list.
    async fn call(&self, args: &[Value]) -> Result<Value, CacheError>;
}

impl std::fmt::Debug for dyn Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Function signature wrapped by [`FnGenerator`].
pub type GeneratorFn = Arc<dyn Fn(&[Value]) -> Result<Value, CacheError> + Send + Sync>;

/// A generator backed by a plain function.
pub struct FnGenerator {
    name: String,
    definition: String,
    replayable: bool,
    func: GeneratorFn,
}

impl FnGenerator {
    /// A generator that workers can replay by name.
    ///
    /// `definition` should describe the computation the way its source would;
    /// it is hashed into cache keys and verified by the worker-side registry.
    pub fn new<F>(name: impl Into<String>, definition: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CacheError> + Send + Sync + 'static,
    {
        FnGenerator {
            name: name.into(),
            definition: definition.into(),
            replayable: true,
            func: Arc::new(func),
        }
    }

    /// A generator that captures process-local state and therefore cannot be
    /// shipped to a worker. Fetches through it always regenerate
    /// synchronously.
    pub fn local<F>(name: impl Into<String>, definition: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CacheError> + Send + Sync + 'static,
    {
        FnGenerator {
            name: name.into(),
            definition: definition.into(),
            replayable: false,
            func: Arc::new(func),
        }
    }
}

#[async_trait]
impl Generator for FnGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn definition(&self) -> &str {
        &self.definition
    }

    fn representation(&self) -> Result<String, CacheError> {
        if !self.replayable {
            return Err(CacheError::GeneratorRepresentation {
                name: self.name.clone(),
                reason: "captures process-local state".to_string(),
            });
        }
        Ok(format!("{}@{}", self.name, self.fingerprint()))
    }

    async fn call(&self, args: &[Value]) -> Result<Value, CacheError> {
        (self.func)(args)
    }
}

/// Worker-side lookup table from representations back to computations.
///
/// Resolution verifies the fingerprint embedded in the representation, so a
/// worker running a different definition of the same name refuses the job
/// instead of writing back a value the requester did not ask for.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        GeneratorRegistry {
            generators: HashMap::new(),
        }
    }

    /// Register a generator under its name, replacing any previous one.
    pub fn register(&mut self, generator: Arc<dyn Generator>) -> &mut Self {
        self.generators
            .insert(generator.name().to_string(), generator);
        self
    }

    /// Resolve a `{name}@{fingerprint}` representation.
    pub fn resolve(&self, representation: &str) -> Result<Arc<dyn Generator>, CacheError> {
        let unknown = || CacheError::UnknownGenerator {
            representation: representation.to_string(),
        };

        let (name, fingerprint) = representation.rsplit_once('@').ok_or_else(unknown)?;
        let generator = self.generators.get(name).ok_or_else(unknown)?;

        if generator.fingerprint() != fingerprint {
            return Err(unknown());
        }

        Ok(Arc::clone(generator))
    }
}

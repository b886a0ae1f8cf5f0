/// Error type for cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// The store was built without a required collaborator.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A generator cannot be represented for cross-process dispatch.
    #[error("generator '{name}' has no reproducible representation: {reason}")]
    GeneratorRepresentation { name: String, reason: String },

    /// A worker received a job for a generator it does not know.
    #[error("no registered generator matches '{representation}'")]
    UnknownGenerator { representation: String },

    /// A backend read or write failed.
    #[error("[{store}] backend error for key '{key}': {message}")]
    Operation {
        store: String,
        key: String,
        message: String,
    },

    /// Submitting a job to the worker dispatcher failed.
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A generator invocation failed.
    #[error("generator '{name}' failed: {message}")]
    Generator { name: String, message: String },
}

impl CacheError {
    /// Create a new backend operation error.
    pub fn operation(
        store: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CacheError::Operation {
            store: store.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}

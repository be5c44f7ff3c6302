use thiserror::Error;

#[derive(Debug, Error)]
pub enum StratoError {
    // Context construction
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operations
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage operation failed: {context}")]
    Storage {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    // Wiring
    #[error("Invalid file storage provider: {0}")]
    InvalidProvider(String),

    #[error("Missing required configuration: {0}")]
    MissingConfiguration(String),
}

impl StratoError {
    /// Wrap a backend failure, preserving the original cause.
    pub fn storage(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            context: context.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StratoError>;

//! Error types for celiguard

/// Result type alias using celiguard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for celiguard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structural misconfiguration (missing encoder, inconsistent artifact)
    #[error("configuration error: {0}")]
    Config(String),

    /// The model artifact failed to load at startup; risk scoring is degraded
    #[error("model unavailable")]
    ModelUnavailable,

    /// Assembled feature vector does not match the training-time schema
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// External collaborator failure (OCR engine, barcode lookup)
    #[error("external service error: {0}")]
    External(String),

    /// Request is malformed before any core component runs
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new schema mismatch error
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }

    /// Create a new external collaborator error
    pub fn external(msg: impl Into<String>) -> Self {
        Self::External(msg.into())
    }

    /// Create a new invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

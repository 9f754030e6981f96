//! Error types for Chronika.

use thiserror::Error;

/// Convenience result alias used across the workspace.
pub type Result<T> = std::result::Result<T, ChronikaError>;

#[derive(Debug, Error)]
pub enum ChronikaError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Auth error: {0}")]
    Auth(String),

    /// The embedding model is disabled or failed to load. Not fatal:
    /// callers branch to the keyword fallback.
    #[error("Encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// Empty or whitespace-only query. Surfaced to the caller as a user
    /// input error, never retried.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Per-text encoding failure; the affected candidate is skipped.
    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

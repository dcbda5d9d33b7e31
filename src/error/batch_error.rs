use thiserror::Error;

/// Errors that reject a whole batch payload.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The payload is not JSON.
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The payload is JSON but not an array.
    #[error("Expected a JSON array.")]
    NotAnArray,
}

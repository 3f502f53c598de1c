use thiserror::Error;

/// Errors surfaced by persistence adapters.
///
/// The catalog and registry log save failures and keep going; this type
/// exists so adapters can report what went wrong, not so callers can abort.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid store state: {0}")]
    Invalid(String),
}

/// Per-ticket payload encoding failure.
///
/// Recovered locally: the affected ticket persists with an empty payload
/// image and the batch continues.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("image encoding failed: {0}")]
    Image(String),
}

//! Error types for the storage layer.

/// Errors that can occur talking to the persistence backend.
///
/// There is deliberately only one interesting case: the backend was
/// unreachable or refused the operation. Storage failures here are
/// *transient* — because every mutation travels in an atomic batch, a
/// failed call leaves no partial state behind and is always safe to
/// retry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend is unavailable or the transaction failed.
    /// No partial state was written; retrying is safe.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

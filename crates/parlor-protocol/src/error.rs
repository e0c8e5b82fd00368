//! Error types for the protocol layer.
//!
//! A `ProtocolError` always means the problem is with the *shape* of
//! data — a value that failed validation, or bytes that would not
//! encode/decode — never with game rules, permissions, or storage.
//! Those concerns have their own error enums in their own crates.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a session or id into stored bytes).
    ///
    /// The inner `serde_json::Error` is wrapped so callers deal with
    /// `ProtocolError` uniformly regardless of which codec produced it.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning stored bytes back into a value).
    ///
    /// For bytes read back out of the store this indicates corruption
    /// or a code/data mismatch, not a caller mistake.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A level outside the valid `Level::MIN..=Level::MAX` range.
    #[error("level {0} is out of range")]
    InvalidLevel(u8),

    /// A display name that failed validation (empty, over-long).
    #[error("invalid name: {0}")]
    InvalidName(String),
}

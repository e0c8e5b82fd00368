//! Codec trait and implementations for turning values into stored bytes.
//!
//! The persistence backend only understands byte values; something has
//! to decide how a [`GameSession`](crate::GameSession) becomes bytes
//! and comes back out intact. That decision is isolated behind the
//! [`Codec`] trait so the orchestrator can be generic over it: the
//! default is [`JsonCodec`] (inspectable with any text tool, handy when
//! poking at a live store), and a binary codec could be dropped in
//! later without touching the rest of the workspace.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because the codec is stored inside the
/// service and shared across Tokio tasks. The methods are generic over
/// the value type: anything `Serialize` goes in, anything
/// `DeserializeOwned` comes out owning its data (the input buffer can
/// be dropped immediately after decoding).
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the value cannot be
    /// represented in this format.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// Behind the default-on `json` feature flag, so a consumer that
/// brings its own codec can drop the `serde_json` dependency.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{GameId, GameSession, Player, PlayerId};

    #[test]
    fn test_json_codec_session_round_trip() {
        let codec = JsonCodec;
        let session = GameSession::new(
            GameId("game1".into()),
            Player::new(PlayerId("a".into()), "Alice").unwrap(),
        );

        let bytes = codec.encode(&session).unwrap();
        let back: GameSession = codec.decode(&bytes).unwrap();
        assert_eq!(session, back);
    }

    #[test]
    fn test_json_codec_decode_garbage_returns_error() {
        let codec = JsonCodec;
        let r: Result<GameSession, _> = codec.decode(b"not json at all");
        assert!(matches!(r, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_decode_wrong_shape_returns_error() {
        // Valid JSON, but missing required session fields.
        let codec = JsonCodec;
        let r: Result<GameSession, _> = codec.decode(br#"{"id": "x"}"#);
        assert!(matches!(r, Err(ProtocolError::Decode(_))));
    }
}

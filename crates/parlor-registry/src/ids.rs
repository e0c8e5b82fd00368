//! Identity minting: the `IdGenerator` seam and its default.
//!
//! Parlor never invents ids inline — every fresh `GameId`, `PlayerId`,
//! and `SessionKey` comes from an [`IdGenerator`] supplied at service
//! construction. That makes identity a swappable concern: production
//! uses [`RandomIds`]; tests that want predictable ids plug in their
//! own generator and nothing else changes.

use parlor_protocol::{GameId, PlayerId, SessionKey};
use rand::Rng;

/// Mints fresh, unique identifiers.
///
/// Uniqueness is the generator's promise, not the registry's: a
/// collision between minted values is a generator failure, and the
/// rest of the system does not re-check for it.
pub trait IdGenerator: Send + Sync + 'static {
    /// A fresh game id.
    fn game_id(&self) -> GameId;

    /// A fresh player id.
    fn player_id(&self) -> PlayerId;

    /// A fresh session key. This one is a *secret* — generators must
    /// draw it from a source that makes guessing infeasible.
    fn session_key(&self) -> SessionKey;
}

/// The default generator: 128 random bits as lowercase hex.
///
/// 2^128 possibilities per value makes both collisions and key
/// guessing computationally irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn game_id(&self) -> GameId {
        GameId(random_hex())
    }

    fn player_id(&self) -> PlayerId {
        PlayerId(random_hex())
    }

    fn session_key(&self) -> SessionKey {
        SessionKey(random_hex())
    }
}

/// A random 32-character hex string (128 bits of entropy).
fn random_hex() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_32_char_lowercase_hex() {
        let key = RandomIds.session_key();
        assert_eq!(key.0.len(), 32);
        assert!(key.0.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key.0, key.0.to_lowercase());
    }

    #[test]
    fn test_random_ids_do_not_repeat() {
        // Not a proof, but a 128-bit space means any repeat here is a
        // bug, not bad luck.
        let ids = RandomIds;
        let a = ids.player_id();
        let b = ids.player_id();
        assert_ne!(a, b);
        assert_ne!(ids.game_id().0, ids.session_key().0);
    }
}

//! Error types for the registry layer.

use parlor_protocol::PlayerId;
use parlor_store::StoreError;

/// Errors that can occur resolving session-key bindings.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The presented session key is not bound to any player.
    /// Could be a stale key (already unbound by a leave/kick), a typo,
    /// or a guess — the caller only learns "not recognized".
    #[error("unknown session key")]
    UnknownKey,

    /// No key is bound for the given player id. Seen during a kick
    /// when looking up the target's binding; for a current member this
    /// indicates the two tables have diverged.
    #[error("no session key bound for player {0}")]
    UnknownPlayer(PlayerId),

    /// A stored binding failed to decode as UTF-8. Only possible if
    /// something other than this registry wrote the key tables.
    #[error("stored binding for table {0} is corrupt")]
    Corrupt(&'static str),

    /// The backend failed; safe to retry.
    #[error(transparent)]
    Store(#[from] StoreError),
}

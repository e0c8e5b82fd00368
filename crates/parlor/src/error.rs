//! Unified error type for the Parlor facade.
//!
//! The orchestrator deals in one error enum whose variants line up
//! with how a transport adapter must answer: validation, not-found,
//! unauthorized, forbidden, conflict, transient storage trouble, and
//! the catch-all internal fault. Sub-crate errors convert in via
//! `From`, so `?` does the mapping inside the service.
//!
//! Every variant is a *reported* failure: request handling never
//! panics, and a failed request never leaves partial state behind
//! (nothing is written until the single atomic commit at the end).

use parlor_protocol::{GameId, ProtocolError};
use parlor_registry::RegistryError;
use parlor_rules::{Denied, RulesError};
use parlor_store::StoreError;

/// Top-level error returned by every `GameService` operation.
#[derive(Debug, thiserror::Error)]
pub enum ParlorError {
    /// Malformed input — a bad name, an out-of-range level. `field`
    /// names the offending parameter for the caller.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The referenced game does not exist.
    #[error("game {0} not found")]
    GameNotFound(GameId),

    /// The session key is unknown, or resolves to a player who is not
    /// a member of the addressed game. Deliberately one variant for
    /// both — a caller probing with a stolen key learns nothing about
    /// which half failed.
    #[error("session key is not valid for this game")]
    Unauthorized,

    /// Authenticated, but not permitted (wrong turn, not host).
    #[error(transparent)]
    Forbidden(#[from] Denied),

    /// The state machine rejected the event (duplicate player,
    /// empty-roster draw, unknown kick target).
    #[error(transparent)]
    Conflict(#[from] RulesError),

    /// The persistence backend failed; safe to retry, nothing was
    /// written.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A bug or corrupted state, not a domain condition — e.g. a
    /// member with no key binding, or a stored session that fails to
    /// decode. Surfaced as a generic server fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ParlorError {
    /// HTTP-style status code for thin transport adapters.
    pub fn code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Unauthorized => 401,
            Self::Forbidden(_) => 403,
            Self::GameNotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
            Self::Storage(_) => 503,
        }
    }
}

impl From<RegistryError> for ParlorError {
    fn from(err: RegistryError) -> Self {
        match err {
            // An unrecognized key is an authentication failure.
            RegistryError::UnknownKey => Self::Unauthorized,
            // A *member* with no binding means the key tables diverged
            // from membership — that is a fault, not a caller error.
            RegistryError::UnknownPlayer(p) => {
                Self::Internal(format!("member {p} has no key binding"))
            }
            RegistryError::Corrupt(table) => {
                Self::Internal(format!("corrupt binding in table {table}"))
            }
            RegistryError::Store(e) => Self::Storage(e),
        }
    }
}

impl From<ProtocolError> for ParlorError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::InvalidName(reason) => Self::Validation {
                field: "name",
                reason,
            },
            ProtocolError::InvalidLevel(v) => Self::Validation {
                field: "level",
                reason: format!("level {v} is out of range"),
            },
            // Codec failures on our own stored data are faults.
            other => Self::Internal(other.to_string()),
        }
    }
}

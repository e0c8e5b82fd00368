//! Error types for the rules layer.
//!
//! Two distinct enums, on purpose. [`RulesError`] means the *state*
//! rejected the event (a domain-rule conflict, regardless of who asked
//! for it); [`Denied`] means this particular *caller* may not perform
//! the action right now. The distinction survives all the way to the
//! transport boundary: one maps to a conflict response, the other to a
//! forbidden response.

use parlor_protocol::PlayerId;

/// A domain-rule violation: the event cannot apply to this session.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The joining player's id is already in the roster.
    #[error("player {0} is already in the session")]
    DuplicatePlayer(PlayerId),

    /// The named player is not a member of this session.
    #[error("player {0} is not in the session")]
    UnknownPlayer(PlayerId),

    /// The session has no players, so there is no turn to advance.
    #[error("no players in the session")]
    NoPlayers,
}

/// A permission denial: the acting player may not perform this action.
///
/// Always evaluated against the freshly loaded session — there is no
/// cached permission state anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denied {
    /// A draw or skip by someone other than the current answerer.
    #[error("it is not your turn")]
    NotYourTurn,

    /// A host-only action (level jump, bootstrap draw) by a non-host.
    #[error("only the host may do this")]
    HostOnly,

    /// A skip while no current answerer is set. Unlike a draw, a skip
    /// has no host bootstrap case — there is nothing to skip.
    #[error("there is no current turn to skip")]
    NothingToSkip,

    /// A removal requested by someone who is neither the target nor
    /// the host.
    #[error("only the player themselves or the host may remove a player")]
    NotSelfOrHost,
}

//! The authorization guard: who may do what, right now.
//!
//! `authorize` is the permission check run between resolving a
//! caller's identity and applying their event. Like the reducer it is
//! pure — it reads the session and answers yes or no — and it is
//! always evaluated against the freshly loaded session, so a kicked
//! player's next request fails here no matter what they were allowed
//! to do a moment ago.
//!
//! The guard decides *who may ask*; whether the request makes sense
//! against the state (target actually a member, roster non-empty) is
//! the reducer's concern. That keeps "you may not" and "you can't"
//! distinguishable at the API boundary.

use parlor_protocol::{GameEvent, GameSession, PlayerId};

use crate::Denied;

/// Checks whether `actor` may apply `event` to `session`.
///
/// Rules per event kind:
/// - `DrawCard` — the current answerer; or, while no answerer is set,
///   the host (who bootstraps the first draw).
/// - `SkipTurn` — the current answerer only. No bootstrap case: a
///   session with no current turn has nothing to skip.
/// - `JumpToLevel` — host only.
/// - `RemovePlayer` — the target themselves (leave) or the host
///   (kick).
/// - `AddPlayer` — always allowed; joins are unauthenticated (the
///   joiner has no key yet), the orchestrator never routes them here,
///   and the guard stays total by answering yes.
pub fn authorize(
    session: &GameSession,
    actor: &PlayerId,
    event: &GameEvent,
) -> Result<(), Denied> {
    match event {
        GameEvent::AddPlayer { .. } => Ok(()),

        GameEvent::RemovePlayer { player_id } => {
            if actor == player_id || session.is_host(actor) {
                Ok(())
            } else {
                Err(Denied::NotSelfOrHost)
            }
        }

        GameEvent::DrawCard => match &session.current_answerer {
            Some(answerer) if answerer == actor => Ok(()),
            Some(_) => Err(Denied::NotYourTurn),
            None if session.is_host(actor) => Ok(()),
            None => Err(Denied::HostOnly),
        },

        GameEvent::SkipTurn => match &session.current_answerer {
            Some(answerer) if answerer == actor => Ok(()),
            Some(_) => Err(Denied::NotYourTurn),
            None => Err(Denied::NothingToSkip),
        },

        GameEvent::JumpToLevel { .. } => {
            if session.is_host(actor) {
                Ok(())
            } else {
                Err(Denied::HostOnly)
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

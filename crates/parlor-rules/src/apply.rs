//! The game state machine: a pure reducer over session values.
//!
//! `apply` is where every game rule lives. It takes the current
//! session and one event and produces a *fresh* session value (or a
//! domain error) — it never mutates its input, performs no I/O, and is
//! fully deterministic. The orchestrator leans on that: if anything
//! downstream fails, the prior session value is still intact and
//! simply never replaced in storage.

use parlor_protocol::{GameEvent, GameSession};

use crate::RulesError;

/// Applies one event to a session, yielding the next session value.
///
/// # Errors
/// - [`RulesError::DuplicatePlayer`] — `AddPlayer` with an id already
///   in the roster.
/// - [`RulesError::UnknownPlayer`] — `RemovePlayer` for a non-member.
/// - [`RulesError::NoPlayers`] — `DrawCard`/`SkipTurn` on a session
///   with an empty roster.
pub fn apply(
    session: &GameSession,
    event: &GameEvent,
) -> Result<GameSession, RulesError> {
    match event {
        GameEvent::AddPlayer { player } => {
            if session.contains(&player.id) {
                return Err(RulesError::DuplicatePlayer(player.id.clone()));
            }
            let mut next = session.clone();
            // Appending preserves join order, so the host (index 0)
            // is unaffected by any number of joins.
            next.players.push(player.clone());
            Ok(next)
        }

        GameEvent::RemovePlayer { player_id } => {
            let Some(index) = session.index_of(player_id) else {
                return Err(RulesError::UnknownPlayer(player_id.clone()));
            };
            let mut next = session.clone();
            next.players.remove(index);
            // The answerer is tracked by id, so removing some other
            // player never retargets the turn. Removing the answerer
            // clears the turn; the host bootstraps the next draw.
            if next.current_answerer.as_ref() == Some(player_id) {
                next.current_answerer = None;
            }
            Ok(next)
        }

        GameEvent::DrawCard => {
            let mut next = advance_turn(session)?;
            next.cards_drawn += 1;
            Ok(next)
        }

        // Same turn advancement as a draw, but the deck cursor stays
        // put: a skipped turn does not consume a card.
        GameEvent::SkipTurn => advance_turn(session),

        GameEvent::JumpToLevel { level } => {
            // `Level` is valid by construction; nothing to re-check.
            let mut next = session.clone();
            next.level = *level;
            Ok(next)
        }
    }
}

/// Moves the current answerer one seat forward in join order.
///
/// With no answerer set, the turn starts at index 0 (the host). From
/// seat `i` it advances to `(i + 1) % players.len()`.
fn advance_turn(session: &GameSession) -> Result<GameSession, RulesError> {
    if session.players.is_empty() {
        return Err(RulesError::NoPlayers);
    }
    let next_index = match session.current_answerer_index() {
        Some(i) => (i + 1) % session.players.len(),
        None => 0,
    };
    let mut next = session.clone();
    next.current_answerer = Some(next.players[next_index].id.clone());
    Ok(next)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! State machine unit tests.
    //!
    //! Naming convention: `test_{event}_{scenario}_{expected}`.
    //! Every test also re-asserts that `apply` left its input alone —
    //! the immutability of the reducer is itself a contract.

    use parlor_protocol::{GameId, Level, Player, PlayerId};

    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn pid(s: &str) -> PlayerId {
        PlayerId(s.to_string())
    }

    fn player(id: &str) -> Player {
        Player::new(pid(id), id).expect("valid test player")
    }

    /// A session with the given member ids, in join order.
    fn session(ids: &[&str]) -> GameSession {
        let mut members = ids.iter().map(|id| player(id));
        let mut s = GameSession::new(
            GameId("game1".into()),
            members.next().expect("at least one member"),
        );
        s.players.extend(members);
        s
    }

    // =====================================================================
    // AddPlayer
    // =====================================================================

    #[test]
    fn test_add_player_appends_at_end() {
        let s = session(&["a", "b"]);

        let next = apply(&s, &GameEvent::AddPlayer { player: player("c") })
            .expect("should succeed");

        assert_eq!(next.player_count(), 3);
        assert_eq!(next.players[2].id, pid("c"));
        // Join order (and therefore the host) is untouched.
        assert_eq!(next.players[0].id, pid("a"));
        assert_eq!(s.player_count(), 2, "input must not be mutated");
    }

    #[test]
    fn test_add_player_duplicate_id_returns_error() {
        let s = session(&["a", "b"]);

        let r = apply(&s, &GameEvent::AddPlayer { player: player("b") });

        assert!(
            matches!(r, Err(RulesError::DuplicatePlayer(p)) if p == pid("b"))
        );
    }

    #[test]
    fn test_add_player_leaves_answerer_absent() {
        let s = session(&["a"]);
        assert_eq!(s.current_answerer, None);

        let next = apply(&s, &GameEvent::AddPlayer { player: player("b") })
            .unwrap();

        assert_eq!(next.current_answerer, None);
    }

    // =====================================================================
    // RemovePlayer
    // =====================================================================

    #[test]
    fn test_remove_player_preserves_relative_order() {
        let s = session(&["a", "b", "c", "d"]);

        let next =
            apply(&s, &GameEvent::RemovePlayer { player_id: pid("b") })
                .unwrap();

        let ids: Vec<_> = next.players.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![pid("a"), pid("c"), pid("d")]);
    }

    #[test]
    fn test_remove_player_unknown_returns_error() {
        let s = session(&["a", "b"]);

        let r = apply(&s, &GameEvent::RemovePlayer { player_id: pid("z") });

        assert!(
            matches!(r, Err(RulesError::UnknownPlayer(p)) if p == pid("z"))
        );
    }

    #[test]
    fn test_remove_host_promotes_next_player() {
        // Host privilege is positional: with index 0 gone, the former
        // index 1 is the new host.
        let s = session(&["a", "b", "c"]);

        let next =
            apply(&s, &GameEvent::RemovePlayer { player_id: pid("a") })
                .unwrap();

        assert!(next.is_host(&pid("b")));
        assert_eq!(next.player_count(), 2);
    }

    #[test]
    fn test_remove_answerer_clears_turn() {
        let mut s = session(&["a", "b", "c"]);
        s.current_answerer = Some(pid("b"));

        let next =
            apply(&s, &GameEvent::RemovePlayer { player_id: pid("b") })
                .unwrap();

        assert_eq!(next.current_answerer, None);
    }

    #[test]
    fn test_remove_other_player_keeps_answerer() {
        // The stale-index trap: removing a lower-indexed player must
        // not silently hand the turn to someone else. Tracking the
        // answerer by id makes this hold by construction.
        let mut s = session(&["a", "b", "c"]);
        s.current_answerer = Some(pid("c"));

        let next =
            apply(&s, &GameEvent::RemovePlayer { player_id: pid("a") })
                .unwrap();

        assert_eq!(next.current_answerer, Some(pid("c")));
        assert_eq!(next.current_answerer_index(), Some(1));
    }

    #[test]
    fn test_remove_last_player_leaves_empty_session() {
        let s = session(&["a"]);

        let next =
            apply(&s, &GameEvent::RemovePlayer { player_id: pid("a") })
                .unwrap();

        assert_eq!(next.player_count(), 0);
        assert_eq!(next.host(), None);
    }

    // =====================================================================
    // DrawCard
    // =====================================================================

    #[test]
    fn test_draw_card_bootstrap_starts_at_host() {
        let s = session(&["a", "b", "c"]);
        assert_eq!(s.current_answerer, None);

        let next = apply(&s, &GameEvent::DrawCard).unwrap();

        assert_eq!(next.current_answerer, Some(pid("a")));
        assert_eq!(next.cards_drawn, 1);
    }

    #[test]
    fn test_draw_card_advances_and_wraps() {
        // currentAnswerer=i must become (i+1) mod n, for every seat.
        let base = session(&["a", "b", "c"]);
        let ids = ["a", "b", "c"];

        for (i, id) in ids.iter().enumerate() {
            let mut s = base.clone();
            s.current_answerer = Some(pid(id));

            let next = apply(&s, &GameEvent::DrawCard).unwrap();

            let expected = ids[(i + 1) % ids.len()];
            assert_eq!(
                next.current_answerer,
                Some(pid(expected)),
                "from seat {i}"
            );
        }
    }

    #[test]
    fn test_draw_card_no_players_returns_error() {
        let mut s = session(&["a"]);
        s.players.clear();

        let r = apply(&s, &GameEvent::DrawCard);

        assert!(matches!(r, Err(RulesError::NoPlayers)));
    }

    #[test]
    fn test_draw_card_single_player_wraps_to_self() {
        let mut s = session(&["a"]);
        s.current_answerer = Some(pid("a"));

        let next = apply(&s, &GameEvent::DrawCard).unwrap();

        assert_eq!(next.current_answerer, Some(pid("a")));
    }

    #[test]
    fn test_draw_card_increments_cursor_each_time() {
        let s = session(&["a", "b"]);

        let s1 = apply(&s, &GameEvent::DrawCard).unwrap();
        let s2 = apply(&s1, &GameEvent::DrawCard).unwrap();

        assert_eq!(s1.cards_drawn, 1);
        assert_eq!(s2.cards_drawn, 2);
    }

    // =====================================================================
    // SkipTurn
    // =====================================================================

    #[test]
    fn test_skip_turn_advances_like_draw() {
        let mut s = session(&["a", "b", "c"]);
        s.current_answerer = Some(pid("a"));

        let next = apply(&s, &GameEvent::SkipTurn).unwrap();

        assert_eq!(next.current_answerer, Some(pid("b")));
    }

    #[test]
    fn test_skip_turn_does_not_advance_cursor() {
        // The one observable difference from a draw: no card is
        // consumed by a skip.
        let mut s = session(&["a", "b"]);
        s.current_answerer = Some(pid("a"));
        s.cards_drawn = 5;

        let next = apply(&s, &GameEvent::SkipTurn).unwrap();

        assert_eq!(next.cards_drawn, 5);
    }

    #[test]
    fn test_skip_turn_no_players_returns_error() {
        let mut s = session(&["a"]);
        s.players.clear();

        let r = apply(&s, &GameEvent::SkipTurn);

        assert!(matches!(r, Err(RulesError::NoPlayers)));
    }

    // =====================================================================
    // JumpToLevel
    // =====================================================================

    #[test]
    fn test_jump_to_level_sets_level_only() {
        let mut s = session(&["a", "b"]);
        s.current_answerer = Some(pid("b"));
        s.cards_drawn = 3;
        let level = Level::new(3).unwrap();

        let next = apply(&s, &GameEvent::JumpToLevel { level }).unwrap();

        assert_eq!(next.level, level);
        // Turn state and cursor are untouched.
        assert_eq!(next.current_answerer, Some(pid("b")));
        assert_eq!(next.cards_drawn, 3);
    }

    #[test]
    fn test_jump_to_level_is_idempotent() {
        let s = session(&["a"]);
        let level = Level::new(2).unwrap();

        let once = apply(&s, &GameEvent::JumpToLevel { level }).unwrap();
        let twice = apply(&once, &GameEvent::JumpToLevel { level }).unwrap();

        assert_eq!(once, twice);
    }
}

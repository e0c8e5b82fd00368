//! `GameService`: the session orchestrator.
//!
//! This is the only component that touches storage, and every
//! operation follows the same pipeline:
//!
//! ```text
//! load session ─→ resolve key ─→ authorize ─→ apply ─→ commit batch
//!   (NotFound)   (Unauthorized)  (Forbidden)  (Conflict)  (Storage)
//! ```
//!
//! A request that fails at any step returns its error and writes
//! nothing — the commit at the end is the first and only mutation, and
//! it is a single atomic batch carrying the new session value plus any
//! key-registry changes (bind on join, unbind on leave/kick).
//!
//! # Known race: concurrent actions on one game
//!
//! There is no in-process lock per game id and no read-modify-write
//! isolation: two concurrent actions against the same game both load
//! the same prior state, compute independent next states, and the
//! later commit silently overwrites the earlier one. Atomicity of each
//! individual batch is guaranteed; serialization *between* requests is
//! not. A stronger implementation would compare-and-bump a version
//! token inside the same atomic batch, or funnel each game id through
//! a queue. For a party game where actions are human-paced, last write
//! wins is the accepted trade.

use std::sync::Arc;

use serde::Serialize;

use parlor_protocol::{
    Codec, GameEvent, GameId, GameSession, JsonCodec, Player, PlayerId,
    SessionKey,
};
use parlor_registry::{IdGenerator, KeyRegistry, RandomIds};
use parlor_rules::{apply, authorize};
use parlor_store::{Store, Table, Write};

use crate::ParlorError;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Result of creating or joining a game: the session snapshot plus the
/// new member's secret key. The key is returned exactly once, here.
#[derive(Debug, Clone, Serialize)]
pub struct NewMembership {
    /// The session after the join.
    pub game: GameSession,
    /// The joining player's bearer credential.
    pub key: SessionKey,
}

// ---------------------------------------------------------------------------
// Per-request context
// ---------------------------------------------------------------------------

/// Everything resolved about one authenticated request: the freshly
/// loaded session and the identity the session key proved.
///
/// Threaded explicitly through the pipeline steps as an ordinary
/// value — no ambient per-request state anywhere.
struct ActionContext {
    session: GameSession,
    actor: PlayerId,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for a [`GameService`].
///
/// Defaults: [`RandomIds`] for identity minting and [`JsonCodec`] for
/// storage serialization. Tests swap in deterministic generators; a
/// deployment with a binary format swaps the codec. The store has no
/// default — persistence is always an explicit choice.
pub struct GameServiceBuilder<S, I = RandomIds, C = JsonCodec> {
    store: S,
    ids: I,
    codec: C,
}

impl<S: Store> GameServiceBuilder<S> {
    /// Starts a builder over the given store with default generator
    /// and codec.
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: RandomIds,
            codec: JsonCodec,
        }
    }
}

impl<S, I, C> GameServiceBuilder<S, I, C> {
    /// Replaces the id generator.
    pub fn id_generator<I2: IdGenerator>(
        self,
        ids: I2,
    ) -> GameServiceBuilder<S, I2, C> {
        GameServiceBuilder {
            store: self.store,
            ids,
            codec: self.codec,
        }
    }

    /// Replaces the storage codec.
    pub fn codec<C2: Codec>(self, codec: C2) -> GameServiceBuilder<S, I, C2> {
        GameServiceBuilder {
            store: self.store,
            ids: self.ids,
            codec,
        }
    }

    /// Builds the service. The store moves behind an `Arc` here — one
    /// instance, constructed at startup, shared by every request for
    /// the life of the process.
    pub fn build(self) -> GameService<S, I, C>
    where
        S: Store,
        I: IdGenerator,
        C: Codec,
    {
        let store = Arc::new(self.store);
        GameService {
            registry: KeyRegistry::new(Arc::clone(&store)),
            store,
            ids: self.ids,
            codec: self.codec,
        }
    }
}

// ---------------------------------------------------------------------------
// GameService
// ---------------------------------------------------------------------------

/// The session orchestrator: composes the rules, the guard, and the
/// key registry over a persistence backend.
///
/// Generic over the three seams —
/// storage ([`Store`]), identity minting ([`IdGenerator`]), and
/// serialization ([`Codec`]) — so tests and deployments vary them
/// independently.
pub struct GameService<S, I = RandomIds, C = JsonCodec> {
    store: Arc<S>,
    registry: KeyRegistry<S>,
    ids: I,
    codec: C,
}

impl<S: Store> GameService<S> {
    /// Shorthand for [`GameServiceBuilder::new`].
    pub fn builder(store: S) -> GameServiceBuilder<S> {
        GameServiceBuilder::new(store)
    }
}

impl<S, I, C> GameService<S, I, C>
where
    S: Store,
    I: IdGenerator,
    C: Codec,
{
    // -- Operations -------------------------------------------------------

    /// Creates a new game containing exactly the creating player, who
    /// is therefore the host. Returns the session and the creator's
    /// secret key; session write and key binding commit in one batch.
    pub async fn create_game(
        &self,
        name: &str,
    ) -> Result<NewMembership, ParlorError> {
        let host = Player::new(self.ids.player_id(), name)?;
        let key = self.ids.session_key();
        let session = GameSession::new(self.ids.game_id(), host.clone());

        self.commit(&session, KeyRegistry::<S>::bind(&key, &host.id).into())
            .await?;

        tracing::info!(game_id = %session.id, player = %host.id, "game created");
        Ok(NewMembership { game: session, key })
    }

    /// Returns the current session snapshot. Read-only; any member's
    /// key is sufficient.
    pub async fn get_game(
        &self,
        game_id: &GameId,
        key: &SessionKey,
    ) -> Result<GameSession, ParlorError> {
        let session = self.load_session(game_id).await?;
        let ctx = self.authenticate(session, key).await?;
        Ok(ctx.session)
    }

    /// Adds a new player to an existing game. Joins are the one
    /// authenticated-player-free mutation: the joiner has no key yet,
    /// so there is no guard step — only the duplicate-id rule.
    pub async fn join_game(
        &self,
        game_id: &GameId,
        name: &str,
    ) -> Result<NewMembership, ParlorError> {
        let session = self.load_session(game_id).await?;
        let player = Player::new(self.ids.player_id(), name)?;
        let key = self.ids.session_key();

        let next = apply(
            &session,
            &GameEvent::AddPlayer { player: player.clone() },
        )?;
        self.commit(&next, KeyRegistry::<S>::bind(&key, &player.id).into())
            .await?;

        tracing::info!(
            game_id = %next.id,
            player = %player.id,
            players = next.player_count(),
            "player joined"
        );
        Ok(NewMembership { game: next, key })
    }

    /// Removes the calling player from the game and revokes their key
    /// binding, both in one batch. Always permitted against one's own
    /// membership.
    pub async fn leave_game(
        &self,
        game_id: &GameId,
        key: &SessionKey,
    ) -> Result<(), ParlorError> {
        let session = self.load_session(game_id).await?;
        let ctx = self.authenticate(session, key).await?;

        let event = GameEvent::RemovePlayer { player_id: ctx.actor.clone() };
        let next = self.transition(&ctx, &event)?;

        self.commit(&next, KeyRegistry::<S>::unbind(key, &ctx.actor).into())
            .await?;

        tracing::info!(
            game_id = %next.id,
            player = %ctx.actor,
            players = next.player_count(),
            "player left"
        );
        Ok(())
    }

    /// Removes `target` from the game. Permitted to the target
    /// themselves or to the host; the target's key binding is looked
    /// up through the reverse table (the caller knows the target's id,
    /// never their secret) and revoked in the same batch.
    pub async fn kick_player(
        &self,
        game_id: &GameId,
        key: &SessionKey,
        target: &PlayerId,
    ) -> Result<GameSession, ParlorError> {
        let session = self.load_session(game_id).await?;
        let ctx = self.authenticate(session, key).await?;

        let event = GameEvent::RemovePlayer { player_id: target.clone() };
        let next = self.transition(&ctx, &event)?;

        // The transition succeeded, so the target was a member and
        // must have a binding; a missing one maps to an internal fault.
        let target_key = self.registry.resolve_key(target).await?;

        self.commit(
            &next,
            KeyRegistry::<S>::unbind(&target_key, target).into(),
        )
        .await?;

        tracing::info!(
            game_id = %next.id,
            by = %ctx.actor,
            target = %target,
            "player kicked"
        );
        Ok(next)
    }

    /// Draws the next card: advances the turn (the host bootstraps the
    /// first draw) and the deck cursor.
    pub async fn draw_card(
        &self,
        game_id: &GameId,
        key: &SessionKey,
    ) -> Result<GameSession, ParlorError> {
        let session = self.load_session(game_id).await?;
        let ctx = self.authenticate(session, key).await?;

        let next = self.transition(&ctx, &GameEvent::DrawCard)?;
        self.commit(&next, Vec::new()).await?;

        tracing::info!(
            game_id = %next.id,
            player = %ctx.actor,
            cards_drawn = next.cards_drawn,
            "card drawn"
        );
        Ok(next)
    }

    /// Passes the current turn without drawing a card. Only the
    /// current answerer may skip.
    pub async fn skip_turn(
        &self,
        game_id: &GameId,
        key: &SessionKey,
    ) -> Result<GameSession, ParlorError> {
        let session = self.load_session(game_id).await?;
        let ctx = self.authenticate(session, key).await?;

        let next = self.transition(&ctx, &GameEvent::SkipTurn)?;
        self.commit(&next, Vec::new()).await?;

        tracing::info!(game_id = %next.id, player = %ctx.actor, "turn skipped");
        Ok(next)
    }

    /// Changes the difficulty level (host only). `level` is the raw
    /// number from the caller and is validated here.
    pub async fn jump_to_level(
        &self,
        game_id: &GameId,
        key: &SessionKey,
        level: u8,
    ) -> Result<GameSession, ParlorError> {
        let level = parlor_protocol::Level::new(level)?;
        let session = self.load_session(game_id).await?;
        let ctx = self.authenticate(session, key).await?;

        let next = self.transition(&ctx, &GameEvent::JumpToLevel { level })?;
        self.commit(&next, Vec::new()).await?;

        tracing::info!(game_id = %next.id, %level, "level changed");
        Ok(next)
    }

    // -- Pipeline steps ---------------------------------------------------

    /// Loads and decodes a session. `GameNotFound` if absent; a stored
    /// session that fails to decode is an internal fault, not a caller
    /// error.
    async fn load_session(
        &self,
        game_id: &GameId,
    ) -> Result<GameSession, ParlorError> {
        let bytes = self
            .store
            .get(Table::Games, &game_id.0)
            .await?
            .ok_or_else(|| ParlorError::GameNotFound(game_id.clone()))?;
        Ok(self.codec.decode(&bytes)?)
    }

    /// Resolves the presented key and checks membership of the loaded
    /// session, producing the request context. Re-done from the store
    /// on every request — a revoked key fails here immediately.
    async fn authenticate(
        &self,
        session: GameSession,
        key: &SessionKey,
    ) -> Result<ActionContext, ParlorError> {
        let actor = self.registry.resolve_player(key).await?;
        if !session.contains(&actor) {
            tracing::debug!(
                game_id = %session.id,
                player = %actor,
                "key resolves to a non-member of this game"
            );
            return Err(ParlorError::Unauthorized);
        }
        Ok(ActionContext { session, actor })
    }

    /// Guard then reducer, in that order: permission denials win over
    /// domain conflicts when both would apply.
    fn transition(
        &self,
        ctx: &ActionContext,
        event: &GameEvent,
    ) -> Result<GameSession, ParlorError> {
        if let Err(denied) = authorize(&ctx.session, &ctx.actor, event) {
            tracing::debug!(
                game_id = %ctx.session.id,
                player = %ctx.actor,
                %denied,
                "action denied"
            );
            return Err(denied.into());
        }
        Ok(apply(&ctx.session, event)?)
    }

    /// Commits the new session value plus any registry writes as one
    /// atomic batch — the single mutation of the whole pipeline.
    async fn commit(
        &self,
        next: &GameSession,
        registry_writes: Vec<Write>,
    ) -> Result<(), ParlorError> {
        let mut batch = Vec::with_capacity(1 + registry_writes.len());
        batch.push(Write::put(
            Table::Games,
            next.id.0.clone(),
            self.codec.encode(next)?,
        ));
        batch.extend(registry_writes);
        self.store.atomic(batch).await?;
        Ok(())
    }
}

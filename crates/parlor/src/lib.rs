//! # Parlor
//!
//! Multiplayer session server for a turn-based party card game.
//!
//! Players join a shared session, draw cards in turn order, skip
//! turns, and jump between difficulty levels; the host (the first
//! player, by join order) can kick players and change the level. This
//! crate is the facade: [`GameService`] composes the pure rules
//! (`parlor-rules`), the session-key registry (`parlor-registry`), and
//! a pluggable key-value backend (`parlor-store`) into the eight
//! operations a transport adapter exposes.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use parlor::{GameServiceBuilder, MemoryStore};
//!
//! # async fn demo() -> Result<(), parlor::ParlorError> {
//! let service = GameServiceBuilder::new(MemoryStore::new()).build();
//!
//! // Alice creates a game and is its host.
//! let alice = service.create_game("Alice").await?;
//!
//! // Bob joins with the game id Alice shared.
//! let bob = service.join_game(&alice.game.id, "Bob").await?;
//!
//! // Alice bootstraps the first draw; the turn lands on her.
//! let game = service.draw_card(&alice.game.id, &alice.key).await?;
//! assert_eq!(game.current_answerer, Some(alice.game.players[0].id.clone()));
//! # let _ = bob;
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::ParlorError;
pub use service::{GameService, GameServiceBuilder, NewMembership};

// Re-export the sub-crate surface so consumers depend on `parlor`
// alone, the way the workspace's own demo does.
pub use parlor_protocol::{
    Codec, GameEvent, GameId, GameSession, JsonCodec, Level, Player,
    PlayerId, ProtocolError, SessionKey,
};
pub use parlor_registry::{IdGenerator, KeyRegistry, RandomIds, RegistryError};
pub use parlor_rules::{Denied, RulesError, apply, authorize};
pub use parlor_store::{MemoryStore, Store, StoreError, Table, Write};

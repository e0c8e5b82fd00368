//! Domain types for Parlor.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//!
//! - **Types** ([`GameSession`], [`Player`], [`GameEvent`], the id
//!   newtypes, [`Level`]) — the values that game rules operate on and
//!   that get persisted.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those values are
//!   converted to/from stored bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong at the data
//!   level (validation, encode/decode).
//!
//! # Architecture
//!
//! This is the bottom of the dependency stack — every other Parlor
//! crate depends on it, and it depends on nothing but serde:
//!
//! ```text
//! parlor (orchestrator)
//!     ↕
//! parlor-rules / parlor-registry / parlor-store
//!     ↕
//! parlor-protocol (this crate)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    GameEvent, GameId, GameSession, Level, MAX_NAME_LEN, Player, PlayerId,
    SessionKey,
};

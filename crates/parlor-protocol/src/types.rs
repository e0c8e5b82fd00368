//! Core domain types for Parlor.
//!
//! Everything a game session is made of lives here: the opaque
//! identifiers, the player roster, the difficulty level, the session
//! value itself, and the events that move it forward. These types are
//! what gets serialized into the store and handed back to transport
//! adapters, so their serde shapes are part of the contract.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::ProtocolError;

/// Maximum length (in characters) of a player display name.
pub const MAX_NAME_LEN: usize = 40;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a game session.
///
/// Opaque lowercase-hex string minted by the id generator. Newtype
/// wrappers keep the three string-shaped identities from being mixed
/// up in signatures: a `GameId` is not a `PlayerId` is not a
/// `SessionKey`, even though all three are strings underneath.
///
/// `#[serde(transparent)]` serializes the wrapper as the bare string,
/// so a `GameId` is just `"4f2a…"` on the wire and in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g-{}", self.0)
    }
}

/// A unique identifier for a player.
///
/// Minted when the player joins; never reused. Public — it appears in
/// session snapshots every member can see, and the host names it when
/// kicking. Knowing a `PlayerId` grants nothing; acting as that player
/// requires the matching [`SessionKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p-{}", self.0)
    }
}

/// A player's secret session key — a bearer credential.
///
/// Whoever presents this key *is* the player it is bound to; there is
/// no second factor. It is minted on join (128 random bits as
/// lowercase hex), returned to the joining client once, and never
/// shown to anyone else.
///
/// Because it is a secret, `Debug` and `Display` render only a short
/// prefix. Serde still carries the full value — the client has to
/// receive the real key, and the store has to index by it — but a key
/// that wanders into a log line comes out clipped.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(pub String);

impl SessionKey {
    /// The first few characters of the key, for logs and errors.
    fn prefix(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKey({}…)", self.prefix())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k-{}…", self.prefix())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One member of a game session.
///
/// Created when the player joins, immutable after that, and dropped
/// from the roster when they leave or are kicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The player's unique identity.
    pub id: PlayerId,
    /// Display name shown to the other players.
    pub name: String,
}

impl Player {
    /// Creates a player, validating the display name.
    ///
    /// The name is trimmed; it must be non-empty and at most
    /// [`MAX_NAME_LEN`] characters after trimming.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidName`] for an empty or
    /// over-long name.
    pub fn new(id: PlayerId, name: &str) -> Result<Self, ProtocolError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProtocolError::InvalidName(
                "name must not be empty".into(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ProtocolError::InvalidName(format!(
                "name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// A difficulty level, always within `Level::MIN..=Level::MAX`.
///
/// The valid range is a closed set (1 through 4); the only way to
/// obtain a `Level` is through [`Level::new`] or deserialization, and
/// both reject out-of-range numbers. Code holding a `Level` never has
/// to re-check it.
///
/// Serialized as the plain number (`2`, not `{"0":2}`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// The easiest level.
    pub const MIN: Level = Level(1);
    /// The hardest level.
    pub const MAX: Level = Level(4);

    /// Validates a raw number into a `Level`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidLevel`] if `value` is outside
    /// `MIN..=MAX`.
    pub fn new(value: u8) -> Result<Self, ProtocolError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ProtocolError::InvalidLevel(value))
        }
    }

    /// The raw level number.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// New sessions start at the easiest level.
impl Default for Level {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Level {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// The full state of one game session.
///
/// This is an immutable value: applying an event produces a *fresh*
/// `GameSession` that replaces the prior one in storage. Nothing in
/// this crate (or in `parlor-rules`) mutates a session in place.
///
/// Invariants maintained by the state machine:
/// - player ids in `players` are unique;
/// - `players` is in join order, and the player at index 0 is the
///   host — host privilege is positional, not a stored flag, so
///   removing index 0 promotes index 1;
/// - `current_answerer`, when present, is the id of a current member.
///   Tracking the answerer by id (not by index) means removing some
///   *other* player can never silently retarget whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// The session's unique ID.
    pub id: GameId,

    /// Members in join order. Index 0 is the host.
    pub players: Vec<Player>,

    /// Whose turn it is to answer the current card, if anyone's.
    /// Absent until the host bootstraps the first draw, and cleared
    /// again if the answering player is removed.
    pub current_answerer: Option<PlayerId>,

    /// Current difficulty level.
    pub level: Level,

    /// Abstract cursor over the deck: how many cards have been drawn.
    /// Skipped turns do not advance it.
    #[serde(default)]
    pub cards_drawn: u64,
}

impl GameSession {
    /// Creates a fresh session containing exactly the creating player,
    /// who is therefore the host.
    pub fn new(id: GameId, host: Player) -> Self {
        Self {
            id,
            players: vec![host],
            current_answerer: None,
            level: Level::default(),
            cards_drawn: 0,
        }
    }

    /// The host, i.e. the player at join-order position 0.
    /// `None` only for a session everyone has left.
    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }

    /// Whether `id` is the host.
    pub fn is_host(&self, id: &PlayerId) -> bool {
        self.host().is_some_and(|h| h.id == *id)
    }

    /// Whether `id` is a current member.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| p.id == *id)
    }

    /// Join-order index of a member.
    pub fn index_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == *id)
    }

    /// Join-order index of the current answerer, if one is set.
    pub fn current_answerer_index(&self) -> Option<usize> {
        self.current_answerer
            .as_ref()
            .and_then(|id| self.index_of(id))
    }

    /// Number of current members.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

// ---------------------------------------------------------------------------
// GameEvent
// ---------------------------------------------------------------------------

/// An action applied to exactly one [`GameSession`].
///
/// Tagged union, discriminated by a `"type"` field in JSON
/// (`#[serde(tag = "type")]`), so a draw serializes as
/// `{"type":"DrawCard"}` and a level jump as
/// `{"type":"JumpToLevel","level":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Append a new player to the end of the roster.
    AddPlayer { player: Player },

    /// Remove a member (self-leave or host kick — the guard decides
    /// which callers may request it).
    RemovePlayer { player_id: PlayerId },

    /// Draw the next card: advance the answerer one seat in join
    /// order (wrapping) and advance the deck cursor.
    DrawCard,

    /// Pass without drawing: advance the answerer exactly as
    /// [`GameEvent::DrawCard`] does, but leave the deck cursor alone.
    SkipTurn,

    /// Change the difficulty level. Turn state is unaffected.
    JumpToLevel { level: Level },
}

// =========================================================================
// Tests
// =========================================================================

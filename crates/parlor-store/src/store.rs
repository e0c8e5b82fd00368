//! The `Store` trait: what Parlor requires of a persistence backend.
//!
//! The orchestrator doesn't care whether state lands in Redis, a SQL
//! table, or a `HashMap` — it needs exactly four capabilities:
//! single-key reads, single-key writes, single-key deletes, and an
//! **atomic multi-key batch**. The batch is the load-bearing one:
//! session state and key-registry changes must become visible together
//! or not at all, and that is the backend's job, not the caller's.

use std::fmt;

use crate::StoreError;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// The logical tables Parlor persists into.
///
/// A closed enum rather than free-form strings: a typo'd table name
/// becomes a compile error instead of a silently empty namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// `GameId -> serialized GameSession`.
    Games,
    /// `SessionKey -> PlayerId` (authenticates inbound actions).
    KeyToPlayer,
    /// `PlayerId -> SessionKey` (finds the binding to remove on kick).
    PlayerToKey,
}

impl Table {
    /// Stable storage-level name for this table.
    pub fn name(self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::KeyToPlayer => "key_to_player",
            Self::PlayerToKey => "player_to_key",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

/// One entry of an atomic batch.
///
/// Components below the orchestrator (the key registry, notably) never
/// touch the store directly for mutations — they *describe* their
/// writes as `Write` values, and the orchestrator commits the combined
/// batch in one [`Store::atomic`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    /// Set `table[key] = value`, creating or overwriting.
    Put {
        table: Table,
        key: String,
        value: Vec<u8>,
    },
    /// Remove `table[key]`. Deleting an absent key is a no-op, not an
    /// error — batches must not fail halfway over already-gone state.
    Delete { table: Table, key: String },
}

impl Write {
    /// Convenience constructor for a put.
    pub fn put(table: Table, key: impl Into<String>, value: Vec<u8>) -> Self {
        Self::Put {
            table,
            key: key.into(),
            value,
        }
    }

    /// Convenience constructor for a delete.
    pub fn delete(table: Table, key: impl Into<String>) -> Self {
        Self::Delete {
            table,
            key: key.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A key-value persistence backend.
///
/// `Send + Sync + 'static` because one store instance is constructed
/// at startup and shared (behind `Arc`) across every concurrent
/// request task for the life of the process.
///
/// # Atomicity contract
///
/// [`atomic`](Store::atomic) applies the whole batch as a single
/// indivisible unit: after a crash or an error, either every entry is
/// visible or none is. This is the only write-consistency primitive
/// Parlor relies on — there is no read-modify-write isolation on top
/// (see the concurrency notes on `parlor::GameService`).
pub trait Store: Send + Sync + 'static {
    /// Reads a single value. `Ok(None)` if the key is absent.
    async fn get(&self, table: Table, key: &str)
    -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes a single value, creating or overwriting.
    async fn put(
        &self,
        table: Table,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), StoreError>;

    /// Deletes a single key. Absent keys are a no-op.
    async fn delete(&self, table: Table, key: &str) -> Result<(), StoreError>;

    /// Applies a batch of writes as one indivisible unit.
    async fn atomic(&self, batch: Vec<Write>) -> Result<(), StoreError>;
}

/// A shared handle to a store is itself a store. Lets a caller hand
/// the service an `Arc<S>` and keep a handle for direct inspection
/// (tests do exactly this).
impl<S: Store> Store for std::sync::Arc<S> {
    async fn get(
        &self,
        table: Table,
        key: &str,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(table, key).await
    }

    async fn put(
        &self,
        table: Table,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), StoreError> {
        (**self).put(table, key, value).await
    }

    async fn delete(&self, table: Table, key: &str) -> Result<(), StoreError> {
        (**self).delete(table, key).await
    }

    async fn atomic(&self, batch: Vec<Write>) -> Result<(), StoreError> {
        (**self).atomic(batch).await
    }
}

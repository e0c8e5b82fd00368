//! The key registry: session keys ↔ player identities.
//!
//! Two tables hold the same relationship from both ends:
//!
//! ```text
//! key_to_player:  SessionKey ──→ PlayerId   (authenticate a request)
//! player_to_key:  PlayerId  ──→ SessionKey  (find the key to revoke)
//! ```
//!
//! The registry's whole job is keeping them in agreement with each
//! other and with game membership. The discipline that achieves it:
//! **reads go to the store, writes never do.** [`KeyRegistry::bind`]
//! and [`KeyRegistry::unbind`] only *describe* their writes as batch
//! entries; the orchestrator commits them in the same atomic batch as
//! the game-state write. There is no code path that can update one
//! direction without the other, or a binding without its membership
//! change.

use std::sync::Arc;

use parlor_protocol::{PlayerId, SessionKey};
use parlor_store::{Store, Table, Write};

use crate::RegistryError;

/// Resolves and describes session-key bindings.
///
/// Cheap to clone; shares the store handle.
#[derive(Debug)]
pub struct KeyRegistry<S> {
    store: Arc<S>,
}

impl<S> Clone for KeyRegistry<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: Store> KeyRegistry<S> {
    /// Creates a registry over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Authenticates an inbound session key.
    ///
    /// # Errors
    /// - [`RegistryError::UnknownKey`] — key not bound to anyone.
    /// - [`RegistryError::Store`] — backend unavailable.
    pub async fn resolve_player(
        &self,
        key: &SessionKey,
    ) -> Result<PlayerId, RegistryError> {
        let bytes = self
            .store
            .get(Table::KeyToPlayer, &key.0)
            .await?
            .ok_or(RegistryError::UnknownKey)?;
        let id = String::from_utf8(bytes)
            .map_err(|_| RegistryError::Corrupt(Table::KeyToPlayer.name()))?;
        Ok(PlayerId(id))
    }

    /// Looks up the key bound to a player — the reverse direction,
    /// used during a kick (the host knows the target's id but must
    /// never learn their secret key; the orchestrator uses the result
    /// only to build the unbind batch).
    ///
    /// # Errors
    /// - [`RegistryError::UnknownPlayer`] — no binding for this id.
    /// - [`RegistryError::Store`] — backend unavailable.
    pub async fn resolve_key(
        &self,
        player_id: &PlayerId,
    ) -> Result<SessionKey, RegistryError> {
        let bytes = self
            .store
            .get(Table::PlayerToKey, &player_id.0)
            .await?
            .ok_or_else(|| {
                tracing::debug!(%player_id, "no key bound for player");
                RegistryError::UnknownPlayer(player_id.clone())
            })?;
        let key = String::from_utf8(bytes)
            .map_err(|_| RegistryError::Corrupt(Table::PlayerToKey.name()))?;
        Ok(SessionKey(key))
    }

    /// Describes both directions of a fresh binding.
    ///
    /// Pure — nothing is written until the caller commits the entries
    /// in its atomic batch. Preconditions (neither side bound
    /// elsewhere) are the id generator's promise and are not
    /// re-checked here.
    pub fn bind(key: &SessionKey, player_id: &PlayerId) -> [Write; 2] {
        [
            Write::put(
                Table::KeyToPlayer,
                key.0.clone(),
                player_id.0.clone().into_bytes(),
            ),
            Write::put(
                Table::PlayerToKey,
                player_id.0.clone(),
                key.0.clone().into_bytes(),
            ),
        ]
    }

    /// Describes removal of both directions of a binding.
    ///
    /// Called exactly once per player removal (self-leave or kick),
    /// and committed in the same batch that writes the shrunken
    /// session — removing only one direction is the consistency
    /// violation this whole layer exists to prevent.
    pub fn unbind(key: &SessionKey, player_id: &PlayerId) -> [Write; 2] {
        [
            Write::delete(Table::KeyToPlayer, key.0.clone()),
            Write::delete(Table::PlayerToKey, player_id.0.clone()),
        ]
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use parlor_store::MemoryStore;

    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn key(s: &str) -> SessionKey {
        SessionKey(s.to_string())
    }

    fn pid(s: &str) -> PlayerId {
        PlayerId(s.to_string())
    }

    fn registry() -> (KeyRegistry<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (KeyRegistry::new(Arc::clone(&store)), store)
    }

    /// Commits a bind the way the orchestrator does: as one batch.
    async fn commit_bind(store: &MemoryStore, k: &SessionKey, p: &PlayerId) {
        store
            .atomic(KeyRegistry::<MemoryStore>::bind(k, p).into())
            .await
            .expect("memory store never fails");
    }

    // =====================================================================
    // bind() / unbind() batch shapes
    // =====================================================================

    #[test]
    fn test_bind_describes_both_directions() {
        let writes = KeyRegistry::<MemoryStore>::bind(&key("k1"), &pid("p1"));

        assert_eq!(
            writes,
            [
                Write::put(Table::KeyToPlayer, "k1", b"p1".to_vec()),
                Write::put(Table::PlayerToKey, "p1", b"k1".to_vec()),
            ]
        );
    }

    #[test]
    fn test_unbind_describes_both_directions() {
        let writes =
            KeyRegistry::<MemoryStore>::unbind(&key("k1"), &pid("p1"));

        assert_eq!(
            writes,
            [
                Write::delete(Table::KeyToPlayer, "k1"),
                Write::delete(Table::PlayerToKey, "p1"),
            ]
        );
    }

    // =====================================================================
    // resolve_player() / resolve_key()
    // =====================================================================

    #[tokio::test]
    async fn test_resolve_player_unknown_key_returns_error() {
        let (reg, _store) = registry();

        let r = reg.resolve_player(&key("nope")).await;

        assert!(matches!(r, Err(RegistryError::UnknownKey)));
    }

    #[tokio::test]
    async fn test_resolve_key_unknown_player_returns_error() {
        let (reg, _store) = registry();

        let r = reg.resolve_key(&pid("ghost")).await;

        assert!(
            matches!(r, Err(RegistryError::UnknownPlayer(p)) if p == pid("ghost"))
        );
    }

    #[tokio::test]
    async fn test_bound_key_resolves_in_both_directions() {
        let (reg, store) = registry();
        commit_bind(&store, &key("k1"), &pid("p1")).await;

        assert_eq!(reg.resolve_player(&key("k1")).await.unwrap(), pid("p1"));
        assert_eq!(reg.resolve_key(&pid("p1")).await.unwrap(), key("k1"));
    }

    #[tokio::test]
    async fn test_round_trip_identity_for_every_bound_key() {
        // resolve_key(resolve_player(k)) == k, for all live bindings.
        let (reg, store) = registry();
        for i in 0..5 {
            commit_bind(&store, &key(&format!("k{i}")), &pid(&format!("p{i}")))
                .await;
        }

        for i in 0..5 {
            let k = key(&format!("k{i}"));
            let p = reg.resolve_player(&k).await.unwrap();
            assert_eq!(reg.resolve_key(&p).await.unwrap(), k);
        }
    }

    #[tokio::test]
    async fn test_unbind_removes_both_directions() {
        let (reg, store) = registry();
        commit_bind(&store, &key("k1"), &pid("p1")).await;

        store
            .atomic(
                KeyRegistry::<MemoryStore>::unbind(&key("k1"), &pid("p1"))
                    .into(),
            )
            .await
            .unwrap();

        assert!(matches!(
            reg.resolve_player(&key("k1")).await,
            Err(RegistryError::UnknownKey)
        ));
        assert!(matches!(
            reg.resolve_key(&pid("p1")).await,
            Err(RegistryError::UnknownPlayer(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_binding_is_reported_not_garbled() {
        let (reg, store) = registry();
        // Simulate a foreign writer leaving non-UTF-8 bytes behind.
        store
            .put(Table::KeyToPlayer, "k1", vec![0xff, 0xfe])
            .await
            .unwrap();

        let r = reg.resolve_player(&key("k1")).await;

        assert!(matches!(r, Err(RegistryError::Corrupt("key_to_player"))));
    }
}

//! In-memory store: the reference [`Store`] implementation.
//!
//! Used by the tests, the demo, and local development. State lives in
//! a single `HashMap` behind a Tokio mutex; holding the lock across a
//! whole batch is what makes [`Store::atomic`] genuinely atomic here.
//! Nothing survives a restart — production deployments plug in a real
//! backend behind the same trait.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::{Store, StoreError, Table, Write};

/// A [`Store`] keeping everything in process memory.
///
/// Cheap to construct per test; share one instance behind `Arc` when
/// several tasks must observe the same state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// All cells across all tables. Keying by `(Table, String)` keeps
    /// the table namespaces disjoint without three separate maps.
    cells: Mutex<HashMap<(Table, String), Vec<u8>>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live cells across all tables. Test helper.
    pub async fn len(&self) -> usize {
        self.cells.lock().await.len()
    }
}

impl Store for MemoryStore {
    async fn get(
        &self,
        table: Table,
        key: &str,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let cells = self.cells.lock().await;
        Ok(cells.get(&(table, key.to_string())).cloned())
    }

    async fn put(
        &self,
        table: Table,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), StoreError> {
        let mut cells = self.cells.lock().await;
        cells.insert((table, key.to_string()), value);
        Ok(())
    }

    async fn delete(&self, table: Table, key: &str) -> Result<(), StoreError> {
        let mut cells = self.cells.lock().await;
        cells.remove(&(table, key.to_string()));
        Ok(())
    }

    async fn atomic(&self, batch: Vec<Write>) -> Result<(), StoreError> {
        // One lock acquisition for the whole batch — no other task can
        // observe a half-applied state.
        let mut cells = self.cells.lock().await;
        tracing::trace!(writes = batch.len(), "applying atomic batch");
        for write in batch {
            match write {
                Write::Put { table, key, value } => {
                    cells.insert((table, key), value);
                }
                Write::Delete { table, key } => {
                    cells.remove(&(table, key));
                }
            }
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================

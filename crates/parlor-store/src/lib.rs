//! Persistence abstraction for Parlor.
//!
//! This crate is the seam between the game core and whatever actually
//! stores bytes:
//!
//! - [`Store`] — the trait backends implement: `get`, `put`, `delete`,
//!   and the atomic multi-key [`atomic`](Store::atomic) batch.
//! - [`Table`] / [`Write`] — the three logical tables and the batch
//!   entries that target them.
//! - [`MemoryStore`] — the in-process reference backend used by tests
//!   and the demo.
//! - [`StoreError`] — the (transient) failure surfaced to callers.
//!
//! # How it fits in the stack
//!
//! ```text
//! parlor (orchestrator, above)  ← commits one atomic batch per action
//!     ↕
//! Store trait (this crate)      ← four calls, one atomicity contract
//!     ↕
//! Backend (below)               ← MemoryStore, or your database
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{Store, Table, Write};

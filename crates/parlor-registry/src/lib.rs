//! Identity and session-key management for Parlor.
//!
//! This crate owns two closely related concerns:
//!
//! 1. **Key bindings** — the bidirectional `SessionKey ↔ PlayerId`
//!    mapping ([`KeyRegistry`]): resolution for authenticating inbound
//!    actions, and batch-write builders the orchestrator commits
//!    atomically alongside game state.
//! 2. **Identity minting** — the [`IdGenerator`] seam with the
//!    `rand`-backed [`RandomIds`] default.
//!
//! # How it fits in the stack
//!
//! ```text
//! parlor (orchestrator, above)  ← merges registry writes into its batch
//!     ↕
//! Registry (this crate)         ← who does a key belong to?
//!     ↕
//! parlor-store (below)          ← the two key tables
//! ```

mod error;
mod ids;
mod registry;

pub use error::RegistryError;
pub use ids::{IdGenerator, RandomIds};
pub use registry::KeyRegistry;

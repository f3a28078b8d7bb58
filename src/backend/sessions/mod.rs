//! Session Module
//!
//! Session identifiers correlate requests with an authenticated identity.
//! This module owns every session: handlers and the auth service only reach
//! them through [`SessionRegistry`].
//!
//! # Module Structure
//!
//! ```text
//! sessions/
//! ├── mod.rs       - Module exports and the session error type
//! ├── registry.rs  - SessionRegistry and ExpiryPolicy
//! ├── store.rs     - SessionStore trait and the in-memory store
//! ├── sql.rs       - SQLite-backed store (user_sessions table)
//! └── clock.rs     - Clock trait, system and manual clocks
//! ```
//!
//! # Strategies
//!
//! | Policy      | Store                 | Expiry            |
//! |-------------|-----------------------|-------------------|
//! | `Bare`      | `MemorySessionStore`  | never             |
//! | `Expiring`  | `MemorySessionStore`  | `SESSION_DURATION`|
//! | `Persisted` | `SqlSessionStore`     | `SESSION_DURATION`|
//!
//! Expiry is lazy: an expired session stops resolving but its record stays
//! in the store until it is destroyed.

use thiserror::Error;

/// Session registry
pub mod registry;

/// Storage capability and in-memory store
pub mod store;

/// SQLite-backed store
pub mod sql;

/// Time sources
pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
pub use registry::{ExpiryPolicy, SessionRegistry};
pub use sql::SqlSessionStore;
pub use store::{MemorySessionStore, SessionRecord, SessionStore};

/// Errors raised while creating or storing sessions
#[derive(Debug, Error)]
pub enum SessionError {
    /// The identity to attach a session to is empty
    #[error("cannot create a session without an identity")]
    InvalidIdentity,

    /// The backing store failed
    #[error("session store error: {0}")]
    Store(#[from] sqlx::Error),
}

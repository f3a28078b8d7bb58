/**
 * Session Registry
 *
 * Mints, resolves and revokes session identifiers. One registry type covers
 * every session strategy; what differs between them is injected:
 *
 * - an [`ExpiryPolicy`] (never, or a max-age)
 * - a [`SessionStore`] (in-memory map or SQL table)
 * - a [`Clock`]
 *
 * # Lifecycle
 *
 * `create` → `resolve`* → `destroy`
 *
 * Resolution fails closed: missing, empty, unknown or expired ids and store
 * faults all come back as `None`. Expired records are left where they are.
 */

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::sessions::clock::{Clock, SystemClock};
use crate::backend::sessions::sql::SqlSessionStore;
use crate::backend::sessions::store::{MemorySessionStore, SessionRecord, SessionStore};
use crate::backend::sessions::SessionError;
use crate::shared::config::SessionPolicy;

/// How long a session stays valid after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpiryPolicy {
    max_age: Option<TimeDelta>,
}

impl ExpiryPolicy {
    /// Sessions never expire
    pub fn never() -> Self {
        Self { max_age: None }
    }

    /// Sessions expire `seconds` after creation; zero or less never expires
    pub fn from_seconds(seconds: i64) -> Self {
        if seconds <= 0 {
            return Self::never();
        }
        Self {
            max_age: TimeDelta::try_seconds(seconds),
        }
    }

    pub fn max_age(&self) -> Option<TimeDelta> {
        self.max_age
    }

    pub fn is_active(&self) -> bool {
        self.max_age.is_some()
    }

    /// A record without a creation time cannot be aged and counts as expired
    /// whenever a max-age is in force.
    pub fn is_expired(&self, created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match (self.max_age, created_at) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(max_age), Some(created_at)) => now - created_at >= max_age,
        }
    }
}

/// Maps session identifiers to identities
#[derive(Clone)]
pub struct SessionRegistry {
    store: Arc<dyn SessionStore>,
    expiry: ExpiryPolicy,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn SessionStore>, expiry: ExpiryPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            expiry,
            clock,
        }
    }

    /// In-memory sessions that never expire
    pub fn bare() -> Self {
        Self::new(
            Arc::new(MemorySessionStore::new()),
            ExpiryPolicy::never(),
            Arc::new(SystemClock),
        )
    }

    /// In-memory sessions with a max-age in seconds
    pub fn expiring(seconds: i64) -> Self {
        Self::new(
            Arc::new(MemorySessionStore::new()),
            ExpiryPolicy::from_seconds(seconds),
            Arc::new(SystemClock),
        )
    }

    /// Sessions kept in the `user_sessions` table with a max-age in seconds
    pub fn persisted(pool: SqlitePool, seconds: i64) -> Self {
        Self::new(
            Arc::new(SqlSessionStore::new(pool)),
            ExpiryPolicy::from_seconds(seconds),
            Arc::new(SystemClock),
        )
    }

    /// Build the registry for a configured policy.
    ///
    /// `Bare` ignores `seconds`.
    pub fn for_policy(policy: SessionPolicy, seconds: i64, pool: SqlitePool) -> Self {
        match policy {
            SessionPolicy::Bare => Self::bare(),
            SessionPolicy::Expiring => Self::expiring(seconds),
            SessionPolicy::Persisted => Self::persisted(pool, seconds),
        }
    }

    /// Replace the clock, keeping store and expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn expiry(&self) -> ExpiryPolicy {
        self.expiry
    }

    fn records_created_at(&self) -> bool {
        self.expiry.is_active() || self.store.is_durable()
    }

    /// Mint a new session for `user_id`.
    ///
    /// Blank identities are rejected. Ids are random UUIDs and are not
    /// checked for collisions.
    pub async fn create(&self, user_id: &str) -> Result<String, SessionError> {
        if user_id.trim().is_empty() {
            return Err(SessionError::InvalidIdentity);
        }

        let session_id = Uuid::new_v4().to_string();
        let created_at = if self.records_created_at() {
            Some(self.clock.now())
        } else {
            None
        };

        self.store
            .insert(SessionRecord {
                session_id: session_id.clone(),
                user_id: user_id.to_string(),
                created_at,
            })
            .await?;

        tracing::debug!("Created session for user {}", user_id);
        Ok(session_id)
    }

    /// Identity behind `session_id`, or `None` if there is no live session.
    pub async fn resolve(&self, session_id: Option<&str>) -> Option<String> {
        let session_id = session_id.filter(|id| !id.is_empty())?;

        let record = match self.store.find(session_id).await {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Session lookup failed: {:?}", e);
                return None;
            }
        };

        if self.expiry.is_expired(record.created_at, self.clock.now()) {
            tracing::debug!("Session for user {} has expired", record.user_id);
            return None;
        }

        Some(record.user_id)
    }

    /// Remove `session_id`. Returns `false` when there was nothing to remove.
    pub async fn destroy(&self, session_id: Option<&str>) -> bool {
        let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
            return false;
        };

        match self.store.remove(session_id).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::error!("Failed to remove session: {:?}", e);
                false
            }
        }
    }
}

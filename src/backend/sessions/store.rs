/**
 * Session Storage
 *
 * This module defines the storage capability behind the session registry
 * and its in-memory implementation. The durable implementation lives in
 * `sessions::sql`.
 *
 * Stores only keep records; deciding whether a record is still valid is
 * the registry's job.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::backend::sessions::SessionError;

/// One session as held by a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionRecord {
    /// Opaque session identifier (UUID v4)
    pub session_id: String,
    /// Identity the session belongs to
    pub user_id: String,
    /// Creation time, only recorded when sessions can expire or are persisted
    pub created_at: Option<DateTime<Utc>>,
}

/// Storage backend for session records
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new record, replacing any record with the same id
    async fn insert(&self, record: SessionRecord) -> Result<(), SessionError>;

    /// Look a record up by session id
    async fn find(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionError>;

    /// Remove a record, returning whether it existed
    async fn remove(&self, session_id: &str) -> Result<bool, SessionError>;

    /// Whether records outlive the process
    fn is_durable(&self) -> bool {
        false
    }
}

/// Session store backed by a map behind a single lock
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, record: SessionRecord) -> Result<(), SessionError> {
        self.entries
            .write()
            .await
            .insert(record.session_id.clone(), record);
        Ok(())
    }

    async fn find(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.entries.read().await.get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<bool, SessionError> {
        Ok(self.entries.write().await.remove(session_id).is_some())
    }
}

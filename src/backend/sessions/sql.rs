/**
 * SQL Session Storage
 *
 * Persists session records in the `user_sessions` table so sessions survive
 * a restart. Expired rows are never deleted here; the registry simply stops
 * resolving them.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::sessions::store::{SessionRecord, SessionStore};
use crate::backend::sessions::SessionError;

/// Session store backed by the `user_sessions` table
#[derive(Debug, Clone)]
pub struct SqlSessionStore {
    pool: SqlitePool,
}

impl SqlSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqlSessionStore {
    async fn insert(&self, record: SessionRecord) -> Result<(), SessionError> {
        let created_at = record.created_at.unwrap_or_else(Utc::now);

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO user_sessions (session_id, user_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&record.session_id)
        .bind(&record.user_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionError> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT session_id, user_id, created_at
            FROM user_sessions
            WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn remove(&self, session_id: &str) -> Result<bool, SessionError> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn is_durable(&self) -> bool {
        true
    }
}

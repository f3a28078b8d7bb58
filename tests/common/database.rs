//! Database test fixtures
//!
//! In-memory pools for isolated tests and on-disk pools for tests that need
//! data to outlive a pool.

use std::path::Path;

use authkeep::backend::server::config::connect_database;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Fresh in-memory database with migrations applied
pub async fn create_test_pool() -> SqlitePool {
    connect_database("sqlite::memory:")
        .await
        .expect("Failed to create test database pool")
}

/// On-disk database in a temporary directory
///
/// The directory, and the database in it, is removed when the fixture is
/// dropped.
pub struct TestDatabase {
    dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        format!("sqlite://{}", self.dir.path().join("authkeep.db").display())
    }

    /// Open a new pool on the same file
    pub async fn connect(&self) -> SqlitePool {
        connect_database(&self.url())
            .await
            .expect("Failed to open test database")
    }
}

/// Number of rows in `user_sessions`
pub async fn count_sessions(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(pool)
        .await
        .expect("Failed to count sessions")
}

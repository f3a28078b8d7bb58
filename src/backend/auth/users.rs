/**
 * User Model and Database Operations
 *
 * This module handles user rows and the queries the auth service needs:
 * lookups by email, id, session reference and reset token, and the updates
 * that set or clear those references.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub hashed_password: String,
    /// Session the user was last given, if any
    pub session_id: Option<String>,
    /// Outstanding password reset token, if any
    pub reset_token: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

const USER_COLUMNS: &str =
    "id, email, hashed_password, session_id, reset_token, created_at, updated_at";

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - User email
/// * `hashed_password` - bcrypt hash of the password
///
/// # Returns
/// Created user or error (a unique violation when the email is taken)
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    hashed_password: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, hashed_password, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(email)
    .bind(hashed_password)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Set or clear a user's session reference
///
/// # Returns
/// Whether a user row was updated
pub async fn set_session_id(
    pool: &SqlitePool,
    user_id: i64,
    session_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET session_id = ?, updated_at = ? WHERE id = ?")
        .bind(session_id)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Clear the session reference of whichever user holds `session_id`
pub async fn clear_session_reference(pool: &SqlitePool, session_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET session_id = NULL, updated_at = ? WHERE session_id = ?")
        .bind(Utc::now())
        .bind(session_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Store a fresh reset token for the user with this email
///
/// # Returns
/// The updated user, or `None` if no user has this email
pub async fn set_reset_token(
    pool: &SqlitePool,
    email: &str,
    reset_token: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET reset_token = ?, updated_at = ?
        WHERE email = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(reset_token)
    .bind(Utc::now())
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Replace the password of the user holding `reset_token` and consume the
/// token, in one statement.
///
/// # Returns
/// The updated user, or `None` if no user holds this token
pub async fn reset_password(
    pool: &SqlitePool,
    reset_token: &str,
    hashed_password: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET hashed_password = ?, reset_token = NULL, updated_at = ?
        WHERE reset_token = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(hashed_password)
    .bind(Utc::now())
    .bind(reset_token)
    .fetch_optional(pool)
    .await
}

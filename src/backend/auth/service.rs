/**
 * Auth Service
 *
 * Façade over the credential hasher, the user store and the session
 * registry. Handlers and the request gate talk to this type only.
 *
 * # Sessions
 *
 * A user holds at most one live session through this service. Creating a
 * session destroys the one the user row still references and stores the new
 * id in its place. Destroying a session clears that reference again.
 *
 * Every step that reads or writes a user's session reference runs under one
 * lock, so two concurrent logins cannot both keep a live session.
 *
 * # Example
 *
 * ```rust,no_run
 * use authkeep::backend::auth::service::AuthService;
 * use authkeep::backend::auth::credentials::CredentialHasher;
 * use authkeep::backend::sessions::SessionRegistry;
 *
 * # async fn example(pool: sqlx::SqlitePool) -> Result<(), authkeep::backend::error::BackendError> {
 * let auth = AuthService::new(pool, SessionRegistry::bare(), CredentialHasher::default());
 * auth.register_user("bob@bob.com", "pw1").await?;
 * let session_id = auth.create_session("bob@bob.com").await?;
 * assert!(session_id.is_some());
 * # Ok(())
 * # }
 * ```
 */

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::auth::credentials::CredentialHasher;
use crate::backend::auth::users::{self, User};
use crate::backend::error::BackendError;
use crate::backend::sessions::SessionRegistry;

/// Authentication façade
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    sessions: SessionRegistry,
    hasher: CredentialHasher,
    session_writes: Arc<Mutex<()>>,
}

impl AuthService {
    pub fn new(pool: SqlitePool, sessions: SessionRegistry, hasher: CredentialHasher) -> Self {
        Self {
            pool,
            sessions,
            hasher,
            session_writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// `DuplicateIdentity` if the email is already taken, including when a
    /// concurrent registration wins the race to the unique index.
    pub async fn register_user(&self, email: &str, password: &str) -> Result<User, BackendError> {
        if users::get_user_by_email(&self.pool, email).await?.is_some() {
            return Err(BackendError::DuplicateIdentity);
        }

        let hashed_password = self.hasher.hash_password(password)?;

        users::create_user(&self.pool, email, &hashed_password)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    BackendError::DuplicateIdentity
                }
                other => BackendError::Database(other),
            })
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, BackendError> {
        Ok(users::get_user_by_email(&self.pool, email).await?)
    }

    /// Check a password against the user's stored hash
    pub fn check_password(&self, user: &User, password: &str) -> bool {
        self.hasher.is_valid(&user.hashed_password, password)
    }

    /// The user these credentials belong to, if they verify
    pub async fn user_from_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, BackendError> {
        let user = self.find_user_by_email(email).await?;
        Ok(user.filter(|user| self.check_password(user, password)))
    }

    /// Whether `email` and `password` identify a user
    pub async fn valid_login(&self, email: &str, password: &str) -> Result<bool, BackendError> {
        Ok(self.user_from_credentials(email, password).await?.is_some())
    }

    /// Start a session for the user with this email
    ///
    /// # Returns
    /// The new session id, or `None` if no user has this email
    pub async fn create_session(&self, email: &str) -> Result<Option<String>, BackendError> {
        match self.find_user_by_email(email).await? {
            Some(user) => Ok(Some(self.create_session_for(&user).await?)),
            None => Ok(None),
        }
    }

    /// Start a session for `user`, replacing the one it currently references
    pub async fn create_session_for(&self, user: &User) -> Result<String, BackendError> {
        let _guard = self.session_writes.lock().await;

        // `user` may predate a concurrent login; replace what the row holds now
        let previous = users::get_user_by_id(&self.pool, user.id)
            .await?
            .and_then(|current| current.session_id);
        if let Some(previous) = previous.as_deref() {
            self.sessions.destroy(Some(previous)).await;
        }

        let session_id = self.sessions.create(&user.id.to_string()).await?;
        users::set_session_id(&self.pool, user.id, Some(&session_id)).await?;

        Ok(session_id)
    }

    /// The user behind a session id, if the session is live
    pub async fn get_user_from_session_id(
        &self,
        session_id: Option<&str>,
    ) -> Result<Option<User>, BackendError> {
        let Some(identity) = self.sessions.resolve(session_id).await else {
            return Ok(None);
        };

        let Ok(user_id) = identity.parse::<i64>() else {
            tracing::warn!("Session resolved to a non-numeric identity");
            return Ok(None);
        };

        Ok(users::get_user_by_id(&self.pool, user_id).await?)
    }

    /// End the session referenced by the user with this id
    pub async fn destroy_session(&self, user_id: i64) -> Result<(), BackendError> {
        let _guard = self.session_writes.lock().await;

        let Some(user) = users::get_user_by_id(&self.pool, user_id).await? else {
            return Ok(());
        };

        if let Some(session_id) = user.session_id.as_deref() {
            self.sessions.destroy(Some(session_id)).await;
        }
        users::set_session_id(&self.pool, user.id, None).await?;

        Ok(())
    }

    /// End a session by its id
    ///
    /// # Returns
    /// `false` if the id is missing or does not name a stored session
    pub async fn destroy_session_id(&self, session_id: Option<&str>) -> Result<bool, BackendError> {
        let _guard = self.session_writes.lock().await;

        if !self.sessions.destroy(session_id).await {
            return Ok(false);
        }

        if let Some(session_id) = session_id {
            users::clear_session_reference(&self.pool, session_id).await?;
        }

        Ok(true)
    }

    /// Issue a password reset token for the user with this email
    ///
    /// # Errors
    ///
    /// `UnknownIdentity` if no user has this email
    pub async fn get_reset_password_token(&self, email: &str) -> Result<String, BackendError> {
        let reset_token = Uuid::new_v4().to_string();

        match users::set_reset_token(&self.pool, email, &reset_token).await? {
            Some(_) => Ok(reset_token),
            None => Err(BackendError::UnknownIdentity),
        }
    }

    /// Consume a reset token and store a new password
    ///
    /// # Errors
    ///
    /// `InvalidResetToken` if the token is not a UUID or no user holds it
    pub async fn update_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<User, BackendError> {
        if Uuid::parse_str(reset_token).is_err() {
            return Err(BackendError::InvalidResetToken);
        }

        let hashed_password = self.hasher.hash_password(new_password)?;

        users::reset_password(&self.pool, reset_token, &hashed_password)
            .await?
            .ok_or(BackendError::InvalidResetToken)
    }
}

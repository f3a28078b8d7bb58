/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The auth service (user store, session registry, hasher)
 * - The request gate, when `AUTH_TYPE` selects one
 * - The loaded configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust
 * use authkeep::backend::auth::AuthService;
 * use axum::extract::State;
 *
 * async fn handler(State(auth): State<AuthService>) {
 *     let _ = auth.sessions();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::credentials::CredentialHasher;
use crate::backend::auth::service::AuthService;
use crate::backend::middleware::gate::RequestGate;
use crate::backend::sessions::SessionRegistry;
use crate::shared::config::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Authentication façade
    pub auth: AuthService,

    /// Gate in front of `/api/v1`, `None` when authentication is disabled
    pub gate: Option<RequestGate>,

    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state for `config`, with the session registry its policy
    /// selects
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let registry =
            SessionRegistry::for_policy(config.session_policy(), config.session_duration, pool.clone());
        Self::with_registry(config, pool, registry)
    }

    /// Build the state around an existing session registry
    pub fn with_registry(config: AppConfig, pool: SqlitePool, registry: SessionRegistry) -> Self {
        tracing::info!(
            "Session policy {:?}, gate {:?}",
            config.session_policy(),
            config.auth_type
        );

        let auth = AuthService::new(pool, registry, CredentialHasher::new(config.bcrypt_cost));
        Self {
            auth,
            gate: RequestGate::from_config(&config),
            config: Arc::new(config),
        }
    }
}

/// Implement FromRef for AuthService
///
/// This allows Axum handlers to extract the auth service directly using
/// `State(AuthService)`.
impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

/// Implement FromRef for the configuration
impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

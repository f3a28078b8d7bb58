/**
 * Request Gate Middleware
 *
 * This module protects the session API. For every request it decides
 * whether the path needs authentication, pulls credentials from the
 * `Authorization` header or the session cookie, and attaches the resolved
 * user to the request extensions.
 *
 * # Gate Flow
 *
 * 1. Path excluded → pass through
 * 2. No `Authorization` header and no session cookie → 401
 * 3. Credentials do not resolve to a user → 403
 * 4. Otherwise → `CurrentUser` inserted, request continues
 *
 * # Strategies
 *
 * Selected by `AUTH_TYPE`:
 * - `auth` - never authenticates
 * - `basic_auth` - `Authorization: Basic base64(email:password)`
 * - `session_auth`, `session_exp_auth`, `session_db_auth` - session cookie
 */

use axum::{
    extract::{OriginalUri, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::backend::auth::cookies::read_cookie;
use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::config::{AppConfig, AuthType};

/// Paths reachable without authentication
pub const EXCLUDED_PATHS: [&str; 4] = [
    "/api/v1/status/",
    "/api/v1/unauthorized/",
    "/api/v1/forbidden/",
    "/api/v1/auth_session/login/",
];

/// The user the gate authenticated, available to handlers as an extension
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Gate configuration: strategy, excluded paths and cookie name
#[derive(Debug, Clone)]
pub struct RequestGate {
    strategy: AuthType,
    excluded_paths: Vec<String>,
    session_name: String,
}

impl RequestGate {
    pub fn new(strategy: AuthType, session_name: impl Into<String>) -> Self {
        Self {
            strategy,
            excluded_paths: EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect(),
            session_name: session_name.into(),
        }
    }

    /// Gate for the configured `AUTH_TYPE`, or `None` when it is unset
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config
            .auth_type
            .map(|strategy| Self::new(strategy, config.session_name.clone()))
    }

    pub fn strategy(&self) -> AuthType {
        self.strategy
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        require_auth(Some(path), self.excluded_paths.as_slice())
    }

    /// Raw `Authorization` header value
    pub fn authorization_header<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
    }

    /// Session id from the configured cookie
    pub fn session_cookie(&self, headers: &HeaderMap) -> Option<String> {
        read_cookie(&CookieJar::from_headers(headers), &self.session_name)
    }

    /// Resolve the request's credentials to a user under this strategy
    pub async fn current_user(
        &self,
        auth: &AuthService,
        headers: &HeaderMap,
    ) -> Result<Option<User>, BackendError> {
        match self.strategy {
            AuthType::Deny => Ok(None),
            AuthType::Basic => {
                let credentials = self
                    .authorization_header(headers)
                    .and_then(extract_base64_authorization_header)
                    .and_then(decode_base64_authorization_header)
                    .and_then(|decoded| extract_user_credentials(&decoded));

                match credentials {
                    Some((email, password)) => auth.user_from_credentials(&email, &password).await,
                    None => Ok(None),
                }
            }
            AuthType::Session(_) => {
                let session_id = self.session_cookie(headers);
                auth.get_user_from_session_id(session_id.as_deref()).await
            }
        }
    }
}

/// Whether `path` needs authentication.
///
/// Paths compare with or without a trailing slash. An excluded entry ending
/// in `*` matches every path it prefixes.
pub fn require_auth<S: AsRef<str>>(path: Option<&str>, excluded_paths: &[S]) -> bool {
    let Some(path) = path else {
        return true;
    };
    if excluded_paths.is_empty() {
        return true;
    }

    let normalized = with_trailing_slash(path);
    !excluded_paths.iter().any(|excluded| {
        let excluded = excluded.as_ref();
        match excluded.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => with_trailing_slash(excluded) == normalized,
        }
    })
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Encoded part of a `Basic` authorization header
pub fn extract_base64_authorization_header(header: &str) -> Option<&str> {
    header.strip_prefix("Basic ")
}

/// Decode a base64 credential as UTF-8
pub fn decode_base64_authorization_header(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

/// Split `email:password` on the first colon; the password may contain more
pub fn extract_user_credentials(decoded: &str) -> Option<(String, String)> {
    decoded
        .split_once(':')
        .map(|(email, password)| (email.to_string(), password.to_string()))
}

/// Gate middleware for the session API
///
/// Installed with `axum::middleware::from_fn_with_state`. Passes every
/// request through when no strategy is configured.
pub async fn gate_middleware(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let Some(gate) = state.gate.as_ref() else {
        return Ok(next.run(request).await);
    };

    if !gate.requires_auth(uri.path()) {
        return Ok(next.run(request).await);
    }

    let headers = request.headers().clone();
    if gate.authorization_header(&headers).is_none() && gate.session_cookie(&headers).is_none() {
        tracing::debug!("No credentials for {}", uri.path());
        return Err(BackendError::handler(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let user = gate
        .current_user(&state.auth, &headers)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Credentials rejected for {}", uri.path());
            BackendError::handler(StatusCode::FORBIDDEN, "Forbidden")
        })?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

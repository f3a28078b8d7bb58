//! In-process test app
//!
//! Builds the real router around a test database and sends requests to it
//! without binding a socket.

use authkeep::backend::routes::create_router;
use authkeep::backend::server::state::AppState;
use authkeep::backend::sessions::SessionRegistry;
use authkeep::shared::config::{AppConfig, AppConfigBuilder};
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use axum_extra::extract::cookie::Cookie;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use super::database::create_test_pool;

/// Config builder with the cheapest bcrypt cost
pub fn test_config() -> AppConfigBuilder {
    AppConfig::builder().bcrypt_cost(4)
}

/// Router plus the state behind it
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App on a fresh in-memory database
    pub async fn new(config: AppConfig) -> Self {
        Self::with_pool(config, create_test_pool().await)
    }

    pub fn with_pool(config: AppConfig, pool: SqlitePool) -> Self {
        Self::from_state(AppState::new(config, pool))
    }

    pub fn with_registry(config: AppConfig, pool: SqlitePool, registry: SessionRegistry) -> Self {
        Self::from_state(AppState::with_registry(config, pool, registry))
    }

    fn from_state(state: AppState) -> Self {
        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.state.auth.pool()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }
}

/// Request builder with an optional `Cookie` header
pub fn request(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}

/// Bodyless request
pub fn empty(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    request(method, uri, cookie).body(Body::empty()).unwrap()
}

/// Form-encoded request
pub fn form(method: Method, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    request(method, uri, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Request with `Authorization: Basic base64(email:password)`
pub fn basic(method: Method, uri: &str, email: &str, password: &str) -> Request<Body> {
    let encoded = STANDARD.encode(format!("{email}:{password}"));
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Basic {encoded}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// `name=value` pair from the response's `Set-Cookie` header, ready to send
/// back as a `Cookie` header
pub fn cookie_from(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_string()).ok())
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.stripped().encoded().to_string())
}

/// Register a user through `POST /users`
pub async fn register(app: &TestApp, email: &str, password: &str) {
    let response = app
        .send(form(
            Method::POST,
            "/users",
            &format!("email={email}&password={password}"),
            None,
        ))
        .await;
    assert_eq!(response.status(), 200, "registration of {email} failed");
}

//! User service integration tests
//!
//! Drives the registration, login, profile, logout and password reset
//! routes through the real router.

use axum::http::{header, Method, StatusCode};
use crate::common::*;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn app() -> TestApp {
    TestApp::new(test_config().build().unwrap()).await
}

fn credentials(email: &str, password: &str) -> String {
    format!("email={email}&password={password}")
}

#[tokio::test]
async fn test_index() {
    let app = app().await;
    let response = app.send(empty(Method::GET, "/", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Bienvenue" }));
}

#[tokio::test]
async fn test_full_session_flow() {
    let app = app().await;

    let response = app
        .send(form(Method::POST, "/users", &credentials("a@b.com", "pw1"), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "email": "a@b.com", "message": "user created" })
    );

    let response = app
        .send(form(Method::POST, "/users", &credentials("a@b.com", "pw1"), None))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "email already registered" })
    );

    let response = app
        .send(form(Method::POST, "/sessions", &credentials("a@b.com", "pw2"), None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(form(Method::POST, "/sessions", &credentials("a@b.com", "pw1"), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = cookie_from(&response, "session_id").unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "email": "a@b.com", "message": "logged in" })
    );

    let response = app.send(empty(Method::GET, "/profile", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "email": "a@b.com" }));

    let response = app.send(empty(Method::DELETE, "/sessions", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = app.send(empty(Method::GET, "/profile", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = app().await;

    let response = app
        .send(form(Method::POST, "/users", "email=a@b.com", None))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "password missing" }));

    let response = app
        .send(form(Method::POST, "/users", "email=&password=pw1", None))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "email missing" }));
}

#[tokio::test]
async fn test_register_rejects_non_form_body() {
    let app = app().await;
    let request = request(Method::POST, "/users", None)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"email":"a@b.com","password":"pw1"}"#))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = app().await;
    let response = app
        .send(form(Method::POST, "/sessions", &credentials("x@y.com", "pw1"), None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = app().await;
    register(&app, "a@b.com", "pw1").await;

    let response = app
        .send(form(Method::POST, "/sessions", "email=a@b.com", None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_new_login_invalidates_previous_cookie() {
    let app = app().await;
    register(&app, "a@b.com", "pw1").await;

    let first = app
        .send(form(Method::POST, "/sessions", &credentials("a@b.com", "pw1"), None))
        .await;
    let first = cookie_from(&first, "session_id").unwrap();
    let second = app
        .send(form(Method::POST, "/sessions", &credentials("a@b.com", "pw1"), None))
        .await;
    let second = cookie_from(&second, "session_id").unwrap();

    let response = app.send(empty(Method::GET, "/profile", Some(&first))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = app.send(empty(Method::GET, "/profile", Some(&second))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_logout_after_concurrent_logins_ends_the_session() {
    let app = app().await;
    register(&app, "a@b.com", "pw1").await;
    let login = || form(Method::POST, "/sessions", &credentials("a@b.com", "pw1"), None);

    for _ in 0..20 {
        let (first, second) = tokio::join!(app.send(login()), app.send(login()));
        let cookies = [
            cookie_from(&first, "session_id").unwrap(),
            cookie_from(&second, "session_id").unwrap(),
        ];

        for cookie in &cookies {
            let response = app.send(empty(Method::DELETE, "/sessions", Some(cookie))).await;
            if response.status() == StatusCode::FOUND {
                let response = app.send(empty(Method::GET, "/profile", Some(cookie))).await;
                assert_eq!(response.status(), StatusCode::FORBIDDEN);
            }
        }

        for cookie in &cookies {
            let response = app.send(empty(Method::GET, "/profile", Some(cookie))).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }
    }
}

#[tokio::test]
async fn test_profile_and_logout_without_session() {
    let app = app().await;

    let response = app.send(empty(Method::GET, "/profile", None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send(empty(Method::GET, "/profile", Some("session_id=nope")))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.send(empty(Method::DELETE, "/sessions", None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = app().await;
    register(&app, "a@b.com", "pw1").await;

    let response = app
        .send(form(Method::POST, "/reset_password", "email=x@y.com", None))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send(form(Method::POST, "/reset_password", "email=a@b.com", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "a@b.com");
    let token = body["reset_token"].as_str().unwrap().to_string();

    let response = app
        .send(form(
            Method::PUT,
            "/reset_password",
            "email=a@b.com&reset_token=not-a-uuid&new_password=pw2",
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send(form(
            Method::PUT,
            "/reset_password",
            &format!("email=a@b.com&reset_token={token}"),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let update = format!("email=a@b.com&reset_token={token}&new_password=pw2");
    let response = app
        .send(form(Method::PUT, "/reset_password", &update, None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "email": "a@b.com", "message": "Password updated" })
    );

    let response = app
        .send(form(Method::POST, "/sessions", &credentials("a@b.com", "pw2"), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .send(form(Method::POST, "/sessions", &credentials("a@b.com", "pw1"), None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The token was consumed by the first update
    let response = app
        .send(form(Method::PUT, "/reset_password", &update, None))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reset_request_without_email() {
    let app = app().await;
    let response = app.send(form(Method::POST, "/reset_password", "", None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app().await;
    let response = app.send(empty(Method::GET, "/nowhere", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_session_api_without_gate() {
    let app = app().await;

    let response = app.send(empty(Method::GET, "/api/v1/status", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "OK" }));

    let response = app.send(empty(Method::GET, "/api/v1/users/me", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

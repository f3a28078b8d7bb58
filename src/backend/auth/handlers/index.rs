/**
 * Index and Fallback Handlers
 */
use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

/// GET / greeting
pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Bienvenue" }))
}

/// 404 for any unmatched route
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

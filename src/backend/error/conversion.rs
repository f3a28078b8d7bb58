/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses so handlers can
 * return `Result<_, BackendError>` directly.
 *
 * # Response Format
 *
 * ```json
 * { "error": "Forbidden" }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({ "error": self.message() });
        (status, Json(body)).into_response()
    }
}

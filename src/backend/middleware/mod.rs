//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//! Middleware functions process requests before they reach handlers.
//!
//! # Architecture
//!
//! - **`gate`** - Request gate protecting the `/api/v1` session API
//!
//! # Example
//!
//! ```rust,no_run
//! use authkeep::backend::middleware::gate_middleware;
//! use authkeep::backend::server::state::AppState;
//! use axum::{middleware, Router};
//!
//! # fn example(state: AppState, api: Router<AppState>) -> Router<AppState> {
//! api.layer(middleware::from_fn_with_state(state, gate_middleware))
//! # }
//! ```

pub mod gate;

pub use gate::{gate_middleware, require_auth, CurrentUser, RequestGate, EXCLUDED_PATHS};

//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - Database fixtures (in-memory and on-disk SQLite)
//! - An in-process test app driven with `tower::ServiceExt::oneshot`
//! - Request builders and response readers

#![allow(dead_code)]

pub mod app;
pub mod database;

// Re-export commonly used utilities
pub use app::*;
pub use database::*;

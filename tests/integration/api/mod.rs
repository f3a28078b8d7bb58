//! API integration tests
//!
//! Integration tests for the user service and the `/api/v1` session API

mod user_service_test;

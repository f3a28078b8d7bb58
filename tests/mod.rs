//! Test suite for authkeep
//!
//! - `integration` drives the real router against SQLite
//! - `property` checks invariants with proptest

pub mod common;
pub mod integration;
pub mod property;

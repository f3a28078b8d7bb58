//! Property-based tests

mod redaction_proptest;

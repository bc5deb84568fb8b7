//! Integration tests for topic-check.
//!
//! These tests run the check engine, formatters and binary against the mock
//! cluster and config fixtures.

pub mod cli_tests;

//! Mock implementations for testing without a live cluster.
//!
//! This module provides a configurable in-memory cluster that can simulate
//! healthy and degraded topics, missing topics and query failures, plus
//! declared config fixtures.

pub mod cluster;
pub mod fixtures;

pub use cluster::*;
pub use fixtures::*;
